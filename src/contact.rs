//! Open a conversation by typing its name into the search box

use tokio::time::sleep;
use tracing::{info, warn};

use crate::driver::Driver;
use crate::errors::ChatError;
use crate::locator::locate;
use crate::selectors;
use crate::session::Session;
use crate::types::{Keystroke, Role};

/// Search for `name` and open the matching chat
///
/// A result whose title equals `name` is preferred. Only when none shows up
/// is the first result clicked, which may be a partial match.
pub async fn resolve<D: Driver>(session: &Session<D>, name: &str) -> Result<(), ChatError> {
    if name.trim().is_empty() {
        return Err(ChatError::ContactNotFound {
            name: name.to_string(),
            source: Box::new(ChatError::NotFound {
                role: Role::ContactLabel,
            }),
        });
    }

    let driver = session.driver();
    let t = session.timeouts();

    let search = locate(
        driver,
        &selectors::search_box(t.per_candidate),
        t.default,
        t.poll_interval,
    )
    .await?;

    driver.clear(&search).await?;
    sleep(t.after_clear).await;
    driver.click(&search).await?;
    driver
        .send_keys(&search, &Keystroke::Text(name.to_string()).as_keys())
        .await?;
    info!("Searching for '{}'", name);

    let exact = selectors::contact_label(name, t.contact_label);
    let target = match locate(driver, &exact, t.contact_label, t.poll_interval).await {
        Ok(element) => element,
        Err(exact_err) => {
            warn!("No result titled exactly '{}', opening the first result", name);
            let first = selectors::first_result(t.first_result);
            match locate(driver, &first, t.first_result, t.poll_interval).await {
                Ok(element) => element,
                Err(_) => {
                    return Err(ChatError::ContactNotFound {
                        name: name.to_string(),
                        source: Box::new(exact_err),
                    });
                }
            }
        }
    };

    driver.click(&target).await?;
    info!("Opened chat '{}'", name);
    sleep(t.after_contact).await;

    Ok(())
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;
