// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Program;
use anyhow::{Result, anyhow};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliOptions {
    pub config_path: PathBuf,
    pub print_config_path: bool,
    pub print_example: bool,
    pub check_only: bool,
    pub show_help: bool,
    pub init_path: Option<PathBuf>,
}

pub fn parse_cli_args<I, S>(
    program: Program,
    args: I,
    default_config_path: PathBuf,
) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        init_path: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            "--init" if program == Program::Editor => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--init requires a database file path"))?;
                options.init_path = Some(PathBuf::from(value.as_ref()));
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run {} --help to see supported options",
                    program.binary_name()
                ));
            }
        }
    }

    Ok(options)
}

pub fn help_text(program: Program) -> String {
    let mut text = format!("{} ({})\n", program.binary_name(), program.summary());
    text.push_str("  --config <path>          Use a specific config path\n");
    text.push_str("  --print-config-path      Print resolved config path\n");
    text.push_str("  --print-example-config   Print a v1 config template\n");
    text.push_str("  --check                  Validate config and exit\n");
    if program == Program::Editor {
        text.push_str("  --init <path>            Create an empty catalog database and exit\n");
    }
    text.push_str("  --help                   Show this help\n");
    text
}

#[cfg(test)]
mod tests {
    use super::{CliOptions, help_text, parse_cli_args};
    use crate::Program;
    use anyhow::Result;
    use std::path::PathBuf;

    fn default_options_path() -> PathBuf {
        PathBuf::from("/tmp/roastery-config.toml")
    }

    #[test]
    fn parse_cli_args_defaults_to_provided_config_path() -> Result<()> {
        let options = parse_cli_args(
            Program::Browser,
            Vec::<String>::new(),
            default_options_path(),
        )?;
        assert_eq!(
            options,
            CliOptions {
                config_path: default_options_path(),
                print_config_path: false,
                print_example: false,
                check_only: false,
                show_help: false,
                init_path: None,
            }
        );
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_config_path_override() -> Result<()> {
        let options = parse_cli_args(
            Program::Editor,
            vec!["--config", "/custom/config.toml"],
            default_options_path(),
        )?;
        assert_eq!(options.config_path, PathBuf::from("/custom/config.toml"));
        Ok(())
    }

    #[test]
    fn parse_cli_args_errors_for_missing_values() {
        let error = parse_cli_args(Program::Browser, vec!["--config"], default_options_path())
            .expect_err("missing config value should fail");
        assert!(error.to_string().contains("--config requires a file path"));

        let error = parse_cli_args(Program::Editor, vec!["--init"], default_options_path())
            .expect_err("missing init value should fail");
        assert!(error.to_string().contains("--init requires"));
    }

    #[test]
    fn parse_cli_args_errors_for_unknown_argument() {
        let error = parse_cli_args(Program::Browser, vec!["--wat"], default_options_path())
            .expect_err("unknown arg should fail");
        let message = error.to_string();
        assert!(message.contains("unknown argument"));
        assert!(message.contains("roastery-browser --help"));
    }

    #[test]
    fn init_is_editor_only() -> Result<()> {
        let options = parse_cli_args(
            Program::Editor,
            vec!["--init", "/tmp/new.sqlite"],
            default_options_path(),
        )?;
        assert_eq!(options.init_path, Some(PathBuf::from("/tmp/new.sqlite")));

        let error = parse_cli_args(
            Program::Browser,
            vec!["--init", "/tmp/new.sqlite"],
            default_options_path(),
        )
        .expect_err("browser has no --init");
        assert!(error.to_string().contains("\"--init\""));
        Ok(())
    }

    #[test]
    fn parse_cli_args_sets_print_check_and_help_flags() -> Result<()> {
        let options = parse_cli_args(
            Program::Browser,
            vec!["--print-config-path", "--print-example-config", "--check", "-h"],
            default_options_path(),
        )?;
        assert!(options.print_config_path);
        assert!(options.print_example);
        assert!(options.check_only);
        assert!(options.show_help);
        Ok(())
    }

    #[test]
    fn help_lists_init_only_for_editor() {
        assert!(help_text(Program::Editor).contains("--init <path>"));
        assert!(!help_text(Program::Browser).contains("--init"));
    }
}
