use anyhow::Result;
use tracing::error;

use crate::App;

const MSBUILD_TOOLS_PATH_KEY: &str =
    "HKLM:SOFTWARE/Microsoft/MSBuild/ToolsVersions/4.0/MSBuildToolsPath";

impl App<'_> {
    pub fn compile(&self, configuration: Option<&str>) -> Result<()> {
        let msbuild_installed = self
            .lookup
            .read_values(MSBUILD_TOOLS_PATH_KEY)
            .map(|values| !values.is_empty())
            .unwrap_or(false);

        if !msbuild_installed {
            error!(
                "MSBuild not installed; install the Visual Studio build tools and retry 'uedt compile'"
            );
            return Ok(());
        }

        let engine = self.engine()?;
        let script = engine.build_script_path();
        if !script.exists() {
            error!(path = %script.display(), "engine build script does not exist");
            return Ok(());
        }

        let configuration = configuration.unwrap_or(&self.config.compile.configuration);

        let args = vec![
            format!("{}Editor", self.project.name()),
            "Win64".to_string(),
            configuration.to_string(),
            self.uproject_arg(),
            "-WaitMutex".to_string(),
        ];

        self.stream(&script, &args)
    }
}
