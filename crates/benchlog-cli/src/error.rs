use benchlog_store::StoreError;

// CLI errors are handled via anyhow at the top level.

pub fn format_error(err: &anyhow::Error) -> String {
    let mut msg = format!("error: {err}");
    for cause in err.chain().skip(1) {
        msg.push_str(&format!("\n  caused by: {cause}"));
    }
    let store_err = err.chain().find_map(|e| e.downcast_ref::<StoreError>());
    if let Some(text) = store_err.and_then(hint) {
        msg.push_str(&format!("\n  hint: {text}"));
    }
    msg
}

fn hint(err: &StoreError) -> Option<&'static str> {
    match err {
        StoreError::NotInitialized(_) => Some("run `benchlog init --repo-url <URL>` first"),
        StoreError::LockContention(_) => {
            Some("another writer holds the lock; remove a stale .lock file if none is running")
        }
        _ => None,
    }
}
