use anyhow::Result;
use tracing::info;
use uedt_core::config::validate_build_configuration;

use crate::App;

impl App<'_> {
    pub fn build(&self, configuration: Option<&str>) -> Result<()> {
        let requested = configuration
            .unwrap_or(&self.config.build.configuration)
            .to_string();

        validate_build_configuration(&requested)?;

        let effective = if requested == "Release" {
            "Shipping"
        } else {
            requested.as_str()
        };

        info!(configuration = %requested, "starting build");

        let engine = self.engine()?;
        let staging_dir = self
            .config
            .build
            .staging_dir
            .join(self.project.name())
            .join(&requested);

        let mut args = vec![
            "BuildCookRun".to_string(),
            format!("-ue4exe={}", engine.editor_cmd_path().display()),
            format!("-project={}", self.uproject_arg()),
            format!("-clientconfig={effective}"),
            format!("-serverconfig={effective}"),
            "-targetplatform=Win64".to_string(),
            "-platform=Win64".to_string(),
            "-noP4".to_string(),
            "-build".to_string(),
            "-cook".to_string(),
            "-stage".to_string(),
            format!("-stagingdirectory={}", staging_dir.display()),
            "-ini:Game[/Script/UnrealEd.ProjectPackagingSettings]:BlueprintNativizationMethod=Disabled"
                .to_string(),
            "-installed".to_string(),
            "-unversionedcookedcontent".to_string(),
            "-compressed".to_string(),
        ];

        if !self.config.maps.is_empty() {
            args.push(format!("-map={}", self.config.maps.join("+")));
        }

        if requested == "Release" {
            args.extend(
                [
                    "-distribution",
                    "-encryptinifiles",
                    "-skipeditorcontent",
                    "-skipcookingeditorcontent",
                    "-pak",
                ]
                .map(str::to_string),
            );
        }

        args.push("-fullrebuild".to_string());

        self.stream(&engine.uat_path(), &args)
    }
}
