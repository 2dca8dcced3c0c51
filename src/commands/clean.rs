//! Clean the public directory

use anyhow::Result;
use std::fs;

use crate::Quill;

/// Remove the generated site
pub fn run(quill: &Quill) -> Result<()> {
    if quill.public_dir.exists() {
        fs::remove_dir_all(&quill.public_dir)?;
        tracing::info!("Deleted: {:?}", quill.public_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_public_dir() {
        let dir = tempfile::tempdir().unwrap();
        let quill = Quill::new(dir.path()).unwrap();
        fs::create_dir_all(quill.public_dir.join("hello")).unwrap();

        run(&quill).unwrap();
        assert!(!quill.public_dir.exists());

        // Cleaning twice is fine
        run(&quill).unwrap();
    }
}
