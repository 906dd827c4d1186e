//! # Example: basic
//!
//! A cell whose loader flips between success and failure, read by a few
//! concurrent consumers while a ticker invalidates it every 200ms.
//!
//! Shows how to:
//! - Build a [`ReloadCell`] with a name, interval and subscribers.
//! - Read through [`ReloadCell::access`].
//! - Watch degraded reads through the built-in [`LogWriter`].
//!
//! ## Run
//! ```bash
//! cargo run --example basic --features logging
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use reloadcell::{LoadError, LoadFn, LogWriter, ReloadCell, Subscribe};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let attempts = Arc::new(AtomicU32::new(0));
    let a = attempts.clone();

    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];
    let cell = ReloadCell::builder(LoadFn::new(move || {
        let a = a.clone();
        async move {
            let n = a.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            if n % 3 == 2 {
                return Err(LoadError::fail(format!("origin unavailable on attempt {n}")));
            }
            Ok(format!("snapshot #{n}"))
        }
    }))
    .with_name("snapshot")
    .with_interval(Duration::from_millis(200))
    .with_subscribers(subs)
    .build();

    let mut readers = Vec::new();
    for id in 0..3 {
        let cell = cell.clone();
        readers.push(tokio::spawn(async move {
            for _ in 0..10 {
                let res = cell
                    .access(|s| {
                        println!("[reader {id}] sees {s}");
                        Ok::<_, std::fmt::Error>(())
                    })
                    .await;
                if let Err(err) = res {
                    println!("[reader {id}] error: {err}");
                }
                tokio::time::sleep(Duration::from_millis(100)).await;
            }
        }));
    }
    for r in readers {
        r.await?;
    }

    println!("loader ran {} times", attempts.load(Ordering::SeqCst));
    Ok(())
}
