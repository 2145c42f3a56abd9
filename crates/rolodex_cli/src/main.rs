//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `rolodex_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use rolodex_core::db::open_db_in_memory;
use rolodex_core::{
    import_table, search_contacts, GroupService, SqliteContactRepository, SqliteGroupRepository,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let log_dir = std::env::temp_dir().join("rolodex-cli-logs");
    if let Err(message) =
        rolodex_core::init_logging(rolodex_core::default_log_level(), &log_dir.to_string_lossy())
    {
        eprintln!("logging disabled: {message}");
    }

    println!("rolodex_core ping={}", rolodex_core::ping());
    println!("rolodex_core version={}", rolodex_core::core_version());

    let conn = open_db_in_memory()?;
    let groups = SqliteGroupRepository::try_new(&conn)?;
    let contacts = SqliteContactRepository::try_new(&conn)?;

    let service = GroupService::new(
        SqliteGroupRepository::try_new(&conn)?,
        SqliteContactRepository::try_new(&conn)?,
    );
    let group = service.create_group("smoke", None)?;

    let payload = b"name,city\nada,london\ngrace,arlington\n";
    let outcome = import_table(&groups, &contacts, group.id, "smoke.csv", payload)?;
    println!(
        "rolodex_core import rows={} columns={}",
        outcome.imported,
        outcome.columns.len()
    );

    let hits = search_contacts(&contacts, group.id, "ada")?;
    println!("rolodex_core search hits={}", hits.len());

    Ok(())
}
