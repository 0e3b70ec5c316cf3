use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use uedt_app::App;

use crate::registry::{CommandRegistry, CommandSpec, OptionBag};

pub fn build_cli(registry: &CommandRegistry) -> Command {
    let mut root = Command::new("uedt")
        .bin_name("uedt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Unreal Engine development workflow tool")
        .subcommand_required(true)
        .arg_required_else_help(true);

    for spec in registry.commands() {
        let mut sub = Command::new(spec.name).about(spec.about);

        for option in &spec.options {
            let mut arg = Arg::new(option.long).long(option.long).help(option.help);
            if let Some(short) = option.short {
                arg = arg.short(short);
            }
            arg = if option.takes_value {
                arg.action(ArgAction::Set)
            } else {
                arg.action(ArgAction::SetTrue)
            };
            sub = sub.arg(arg);
        }

        root = root.subcommand(sub);
    }

    root
}

pub fn dispatch(registry: &CommandRegistry, app: &App<'_>, matches: &ArgMatches) -> Result<()> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        bail!("no command selected");
    };

    let Some(spec) = registry.find(name) else {
        tracing::error!("no such command \"{name}\"");
        return Ok(());
    };

    let options = collect_options(spec, sub_matches);
    spec.handler.execute(app, &options)
}

fn collect_options(spec: &CommandSpec, matches: &ArgMatches) -> OptionBag {
    let mut bag = OptionBag::default();

    for option in &spec.options {
        if option.takes_value {
            if let Some(value) = matches.get_one::<String>(option.long) {
                bag.insert_value(option.long, value.clone());
            }
        } else if matches.get_flag(option.long) {
            bag.set_flag(option.long);
        }
    }

    bag
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_declares_every_registered_verb() {
        let registry = CommandRegistry::build().expect("registry");
        let cli = build_cli(&registry);

        for spec in registry.commands() {
            assert!(
                cli.find_subcommand(spec.name).is_some(),
                "missing subcommand {}",
                spec.name
            );
        }
    }

    #[test]
    fn short_and_long_forms_land_under_the_long_name() {
        let registry = CommandRegistry::build().expect("registry");
        let cli = build_cli(&registry);

        let matches = cli
            .clone()
            .try_get_matches_from(["uedt", "launch", "-m", "opti|debug"])
            .expect("short form parses");
        let (name, sub) = matches.subcommand().expect("subcommand");
        let spec = registry.find(name).expect("launch spec");
        let bag = collect_options(spec, sub);
        assert_eq!(bag.value("mode"), Some("opti|debug"));

        let matches = cli
            .try_get_matches_from(["uedt", "launch", "--mode", "trace", "--strict-mode"])
            .expect("long form parses");
        let (_, sub) = matches.subcommand().expect("subcommand");
        let bag = collect_options(spec, sub);
        assert_eq!(bag.value("mode"), Some("trace"));
        assert!(bag.is_set("strict-mode"));
    }

    #[test]
    fn unknown_verb_is_rejected_by_the_parser() {
        let registry = CommandRegistry::build().expect("registry");
        let cli = build_cli(&registry);

        let error = cli
            .try_get_matches_from(["uedt", "frobnicate"])
            .expect_err("unknown verb");
        assert_eq!(error.kind(), clap::error::ErrorKind::InvalidSubcommand);
    }
}
