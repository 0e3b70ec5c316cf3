pub mod cleanup;
pub mod config;
pub mod launch_mode;
pub mod perforce;
pub mod process;
pub mod procs;
pub mod project;
pub mod registry_lookup;
#[cfg(test)]
pub(crate) mod test_support;
