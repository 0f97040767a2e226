//! Paths inside the invocation image where injected files are staged

/// Where a relocation mapping is staged for the invocation image
pub const RELOCATION_MAPPING_PATH: &str = "/cnab/app/relocation-mapping.json";

const DEPENDENCIES_DIR: &str = "/cnab/app/dependencies";

/// Where a dependency's bundle definition is staged for its parent
pub fn dependency_definition_path(alias: &str) -> String {
    format!("{DEPENDENCIES_DIR}/{alias}/bundle.json")
}

/// Directory holding a dependency's outputs for its parent
pub fn dependency_outputs_dir(alias: &str) -> String {
    format!("{DEPENDENCIES_DIR}/{alias}/outputs")
}

/// Where one dependency output is staged. Only the output's base name is used.
pub fn dependency_output_path(alias: &str, output: &str) -> String {
    let trimmed = output.trim_end_matches(['/', '\\']);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    format!("{}/{name}", dependency_outputs_dir(alias))
}
