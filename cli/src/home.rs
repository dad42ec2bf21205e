use std::fs;
use std::path::{Path, PathBuf};

use stackcalc::Program;

/// Creates `~/.stackcalc/` if it doesn't exist, returns its path.
pub fn ensure_home_dir() -> Result<PathBuf, String> {
    let home = dirs::home_dir().ok_or("could not determine home directory")?;
    let calc_home = home.join(".stackcalc");
    if !calc_home.exists() {
        fs::create_dir_all(&calc_home)
            .map_err(|e| format!("failed to create ~/.stackcalc: {e}"))?;
    }
    Ok(calc_home)
}

/// Creates `programs/` under the home directory if missing, returns its path.
pub fn ensure_programs_dir(home: &Path) -> Result<PathBuf, String> {
    let dir = home.join("programs");
    if !dir.exists() {
        fs::create_dir_all(&dir).map_err(|e| format!("failed to create {}: {e}", dir.display()))?;
    }
    Ok(dir)
}

fn program_path(home: &Path, name: &str) -> Result<PathBuf, String> {
    if name.is_empty()
        || name.starts_with('.')
        || name.contains(|c: char| c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(format!("invalid program name: {name:?}"));
    }
    Ok(home.join("programs").join(format!("{name}.json")))
}

/// Writes a program as `programs/<name>.json`, replacing any existing one.
pub fn save_program(home: &Path, name: &str, program: &Program) -> Result<PathBuf, String> {
    let path = program_path(home, name)?;
    ensure_programs_dir(home)?;
    let json = program.to_json().map_err(|e| e.to_string())?;
    fs::write(&path, json).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
    tracing::debug!("saved program {name} to {}", path.display());
    Ok(path)
}

/// Reads `programs/<name>.json`.
pub fn load_program(home: &Path, name: &str) -> Result<Program, String> {
    let path = program_path(home, name)?;
    if !path.exists() {
        return Err(format!("no saved program named {name}"));
    }
    let content =
        fs::read_to_string(&path).map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    Program::from_json(&content).map_err(|e| format!("{}: {e}", path.display()))
}

/// Names of all saved programs, sorted.
pub fn list_programs(home: &Path) -> Result<Vec<String>, String> {
    let dir = home.join("programs");
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(&dir).map_err(|e| format!("failed to read {}: {e}", dir.display()))?;
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}
