use anyhow::Result;
use uedt_app::App;

use crate::registry::{CommandHandler, CommandSpec, OptionBag, OptionSpec};

struct BuildCommand;

impl CommandHandler for BuildCommand {
    fn execute(&self, app: &App<'_>, options: &OptionBag) -> Result<()> {
        app.build(options.value("configuration"))
    }
}

struct CleanCommand;

impl CommandHandler for CleanCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.clean()
    }
}

struct CompileCommand;

impl CommandHandler for CompileCommand {
    fn execute(&self, app: &App<'_>, options: &OptionBag) -> Result<()> {
        app.compile(options.value("configuration"))
    }
}

struct LaunchCommand;

impl CommandHandler for LaunchCommand {
    fn execute(&self, app: &App<'_>, options: &OptionBag) -> Result<()> {
        app.launch(options.value("mode"), options.is_set("strict-mode"))
    }
}

struct UiCommand;

impl CommandHandler for UiCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.ui()
    }
}

struct RebuildLightingCommand;

impl CommandHandler for RebuildLightingCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.rebuild_lighting()
    }
}

struct CookCommand;

impl CommandHandler for CookCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.cook()
    }
}

struct ValidateCommand;

impl CommandHandler for ValidateCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.validate()
    }
}

struct ShowChangelistCommand;

impl CommandHandler for ShowChangelistCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.show_changelist()
    }
}

struct GauntletCommand;

impl CommandHandler for GauntletCommand {
    fn execute(&self, app: &App<'_>, options: &OptionBag) -> Result<()> {
        app.gauntlet(options.value("target"))
    }
}

struct FixBinaryPermissionsCommand;

impl CommandHandler for FixBinaryPermissionsCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.fix_binary_permissions()
    }
}

struct VcsRoundtripCommand;

impl CommandHandler for VcsRoundtripCommand {
    fn execute(&self, app: &App<'_>, _options: &OptionBag) -> Result<()> {
        app.vcs_roundtrip()
    }
}

pub(crate) fn all() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "build",
            about: "Build the project through UAT BuildCookRun",
            options: vec![OptionSpec::value(
                "configuration",
                Some('c'),
                "Override the default build configuration (Development, Test, Shipping, Release)",
            )],
            handler: Box::new(BuildCommand),
        },
        CommandSpec {
            name: "clean",
            about: "Remove Binaries, Intermediate and generated Saved folders",
            options: Vec::new(),
            handler: Box::new(CleanCommand),
        },
        CommandSpec {
            name: "compile",
            about: "Compile the editor target with the MSBuild toolchain",
            options: vec![OptionSpec::value(
                "configuration",
                Some('c'),
                "Override the default compile configuration (Development, Shipping)",
            )],
            handler: Box::new(CompileCommand),
        },
        CommandSpec {
            name: "launch",
            about: "Launch the game, optionally with a launch mode",
            options: vec![
                OptionSpec::value(
                    "mode",
                    Some('m'),
                    "Launch mode tokens joined by '|' (opti, trace, debug)",
                ),
                OptionSpec::flag("strict-mode", "Reject unknown launch mode tokens"),
            ],
            handler: Box::new(LaunchCommand),
        },
        CommandSpec {
            name: "ui",
            about: "Launch the Unreal Insights tool",
            options: Vec::new(),
            handler: Box::new(UiCommand),
        },
        CommandSpec {
            name: "rebuildlight",
            about: "Rebuild lighting for the configured maps",
            options: Vec::new(),
            handler: Box::new(RebuildLightingCommand),
        },
        CommandSpec {
            name: "cook",
            about: "Cook content for shipping build testing",
            options: Vec::new(),
            handler: Box::new(CookCommand),
        },
        CommandSpec {
            name: "validate",
            about: "Run the DataValidation commandlet (plugin required)",
            options: Vec::new(),
            handler: Box::new(ValidateCommand),
        },
        CommandSpec {
            name: "showChangelist",
            about: "Show the latest submitted changelist for the configured depot path",
            options: Vec::new(),
            handler: Box::new(ShowChangelistCommand),
        },
        CommandSpec {
            name: "gauntlet",
            about: "Run a Gauntlet automation test; requires --target",
            options: vec![OptionSpec::value(
                "target",
                None,
                "Name of the Gauntlet test to execute",
            )],
            handler: Box::new(GauntletCommand),
        },
        CommandSpec {
            name: "fixBinaryPermissions",
            about: "Make dll, pdb and project metadata files writable again",
            options: Vec::new(),
            handler: Box::new(FixBinaryPermissionsCommand),
        },
        CommandSpec {
            name: "test",
            about: "Sandbox round trip against the Perforce server",
            options: Vec::new(),
            handler: Box::new(VcsRoundtripCommand),
        },
    ]
}
