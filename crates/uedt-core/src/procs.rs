use crate::process::{DEFAULT_CAPTURE_TIMEOUT, ProcessRunner};

pub fn is_process_running(image_name: &str, runner: &dyn ProcessRunner) -> bool {
    if cfg!(windows) {
        let filter = format!("IMAGENAME eq {image_name}");
        match runner.run_captured(
            "tasklist",
            &["/FI", &filter, "/NH"],
            DEFAULT_CAPTURE_TIMEOUT,
        ) {
            Ok(output) => output.success() && output.stdout.contains(image_name),
            Err(error) => {
                tracing::debug!(%error, "process probe failed");
                false
            }
        }
    } else {
        let name = image_name.strip_suffix(".exe").unwrap_or(image_name);
        match runner.run_captured("pgrep", &["-x", name], DEFAULT_CAPTURE_TIMEOUT) {
            Ok(output) => output.success(),
            Err(error) => {
                tracing::debug!(%error, "process probe failed");
                false
            }
        }
    }
}
