use std::collections::{BTreeMap, BTreeSet};

use anyhow::{Result, bail};
use uedt_app::App;

use crate::commands;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub long: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
    pub takes_value: bool,
}

impl OptionSpec {
    pub const fn value(long: &'static str, short: Option<char>, help: &'static str) -> Self {
        Self {
            long,
            short,
            help,
            takes_value: true,
        }
    }

    pub const fn flag(long: &'static str, help: &'static str) -> Self {
        Self {
            long,
            short: None,
            help,
            takes_value: false,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OptionBag {
    values: BTreeMap<&'static str, String>,
    flags: BTreeSet<&'static str>,
}

impl OptionBag {
    pub fn insert_value(&mut self, name: &'static str, value: String) {
        self.values.insert(name, value);
    }

    pub fn set_flag(&mut self, name: &'static str) {
        self.flags.insert(name);
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags.contains(name)
    }
}

pub trait CommandHandler {
    fn execute(&self, app: &App<'_>, options: &OptionBag) -> Result<()>;
}

pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub options: Vec<OptionSpec>,
    pub handler: Box<dyn CommandHandler>,
}

pub struct CommandRegistry {
    commands: Vec<CommandSpec>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field(
                "commands",
                &self.commands.iter().map(|c| c.name).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl CommandRegistry {
    pub fn build() -> Result<Self> {
        Self::from_commands(commands::all())
    }

    pub fn from_commands(commands: Vec<CommandSpec>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for spec in &commands {
            if !seen.insert(spec.name) {
                bail!("duplicate command name '{}' in registry", spec.name);
            }
        }

        Ok(Self { commands })
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn find(&self, name: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|spec| spec.name == name)
    }
}
