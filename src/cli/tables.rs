use anyhow::Result;

use stride::config::StrideConfig;
use stride::extract::tables::KeywordTables;

/// Print the keyword tables in effect, ready to copy into a tables file.
pub fn tables(config: &StrideConfig) -> Result<()> {
    let tables = KeywordTables::from_config(&config.extraction)?;
    match config.extraction.tables_path.as_deref() {
        Some(path) => println!("# loaded from {path}"),
        None => println!("# built-in tables"),
    }
    print!("{}", tables.to_toml()?);
    Ok(())
}
