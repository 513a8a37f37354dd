use std::fs;

use serde::Deserialize;

use crate::script::Step;
use anyhow::{Context, Result};

#[derive(clap::Parser)]
pub struct CmdLine {
    /// Path to the TOML script to replay
    #[clap(short, long)]
    pub script: String,

    #[clap(long, short, rename_all = "lowercase")]
    pub log_level: Option<tracing::Level>,

    /// Print the physical slot layout after every step
    #[clap(short, long)]
    pub physical: bool,

    /// Cross-check every step against a VecDeque
    #[clap(long)]
    pub check: bool,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub check: bool,

    #[serde(default)]
    pub physical: bool,

    #[serde(rename = "step", default)]
    pub steps: Vec<Step>,
}

impl Config {
    pub fn parse(script: &str) -> Result<Self> {
        Ok(toml::from_str(script)?)
    }

    pub fn load(cmd_line: &CmdLine) -> Result<Self> {
        let mut cfg = Self::parse(&fs::read_to_string(&cmd_line.script).with_context(|| {
            format!("failed to read script file from: {}", cmd_line.script)
        })?)
        .with_context(|| format!("failed to parse script file from: {}", cmd_line.script))?;
        if cmd_line.check {
            cfg.check = true
        }
        if cmd_line.physical {
            cfg.physical = true
        }
        Ok(cfg)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_steps() {
        let cfg = Config::parse(
            r#"
            check = true

            [[step]]
            op = "push-back"
            value = 3

            [[step]]
            op = "get"
            index = 0

            [[step]]
            op = "pop-front"
            "#,
        )
        .unwrap();
        assert!(cfg.check);
        assert!(!cfg.physical);
        assert_eq!(
            cfg.steps,
            [
                Step::PushBack { value: 3 },
                Step::Get { index: 0 },
                Step::PopFront
            ]
        );
    }

    #[test]
    fn empty_script() {
        let cfg = Config::parse("").unwrap();
        assert!(cfg.steps.is_empty());
    }

    #[test]
    fn reject_unknown_op() {
        assert!(Config::parse("[[step]]\nop = \"insert\"\n").is_err());
    }
}
