use std::path::Path;

use crate::app::commands::check_key;
use crate::domain::AppError;

pub fn run_check_key(path: &Path) -> Result<(), AppError> {
    let envelope = check_key::execute(path)?;
    let label = if envelope.key_type.is_empty() {
        "PRIVATE KEY".to_string()
    } else {
        format!("{} PRIVATE KEY", envelope.key_type)
    };
    println!("✅ {} contains a valid {} envelope", path.display(), label);
    Ok(())
}
