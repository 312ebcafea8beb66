use tracing::{debug, info};

use crate::{Data, Error};

pub fn delete(data: &Data, symbols: &[String]) -> Result<(), Error> {
    let controller = &data.controller;

    info!("delete: invoked symbols=[{}]", symbols.join(", "));

    let mut removed: Vec<String> = Vec::new();
    let mut missing: Vec<String> = Vec::new();

    for sym in symbols {
        let sym = sym.trim().to_uppercase();
        if controller.remove_by_symbol(&sym)? {
            debug!("delete: removed symbol={}", sym);
            removed.push(sym);
        } else {
            debug!("delete: not tracked symbol={}", sym);
            missing.push(sym);
        }
    }

    info!(
        "delete: completed ok={} missing={}",
        removed.len(),
        missing.len()
    );

    if !removed.is_empty() {
        println!("{} was deleted.", removed.join(", "));
    }
    if !missing.is_empty() {
        println!("Not in watchlist: {}", missing.join(", "));
    }

    Ok(())
}
