// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Notice, TableKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ru,
}

const EN_COFFEE_COLUMNS: [&str; 6] = [
    "Name",
    "RoastingLevel",
    "State",
    "Description",
    "Cost",
    "Volume",
];
const RU_COFFEE_COLUMNS: [&str; 6] = [
    "Название",
    "Степень обжарки",
    "Состояние",
    "Описание",
    "Цена (руб)",
    "Объем (куб. см)",
];
const EN_LOOKUP_COLUMNS: [&str; 1] = ["Name"];
const RU_LOOKUP_COLUMNS: [&str; 1] = ["Название"];

impl Locale {
    pub const ALL: [Self; 2] = [Self::En, Self::Ru];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ru => "ru",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "en" => Some(Self::En),
            "ru" => Some(Self::Ru),
            _ => None,
        }
    }

    /// Header labels for the browser listing; same layout as the coffee grid.
    pub fn catalog_columns(self) -> &'static [&'static str] {
        self.columns(TableKind::Coffee)
    }

    pub fn columns(self, table: TableKind) -> &'static [&'static str] {
        match (self, table) {
            (Self::En, TableKind::Coffee) => &EN_COFFEE_COLUMNS,
            (Self::Ru, TableKind::Coffee) => &RU_COFFEE_COLUMNS,
            (Self::En, TableKind::RoastingLevels | TableKind::States) => &EN_LOOKUP_COLUMNS,
            (Self::Ru, TableKind::RoastingLevels | TableKind::States) => &RU_LOOKUP_COLUMNS,
        }
    }

    pub const fn tab_label(self, table: TableKind) -> &'static str {
        match (self, table) {
            (Self::En, TableKind::Coffee) => "coffee",
            (Self::En, TableKind::RoastingLevels) => "roasting levels",
            (Self::En, TableKind::States) => "states",
            (Self::Ru, TableKind::Coffee) => "кофе",
            (Self::Ru, TableKind::RoastingLevels) => "степени обжарки",
            (Self::Ru, TableKind::States) => "состояния",
        }
    }

    pub const fn notice_title(self) -> &'static str {
        match self {
            Self::En => "Error!",
            Self::Ru => "Ошибка!",
        }
    }

    pub const fn notice_text(self, notice: Notice) -> &'static str {
        match (self, notice) {
            (Self::En, Notice::FileNotFound) => "File not found :(",
            (Self::En, Notice::ReadError) => "Error reading file :(",
            (Self::Ru, Notice::FileNotFound) => "Файл не найден :(",
            (Self::Ru, Notice::ReadError) => "Ошибка при чтении файла :(",
        }
    }
}
