use anyhow::Result;

use folio_core::{AppConfig, FileStore, SessionStore};

pub fn show(config: &AppConfig) -> Result<()> {
    let store = FileStore::default();
    let key = &config.navigation.session_key;

    match store.get(key)? {
        Some(value) => {
            let title = value
                .parse::<usize>()
                .ok()
                .and_then(|i| config.sections.get(i))
                .map(|s| s.title.as_str())
                .unwrap_or("(unknown section)");
            println!("{} = {} ({})", key, value, title);
        }
        None => println!("No saved section in {}", store.path().display()),
    }

    Ok(())
}

pub fn clear(config: &AppConfig) -> Result<()> {
    let mut store = FileStore::default();
    store.remove(&config.navigation.session_key)?;
    println!("Cleared saved section");
    Ok(())
}
