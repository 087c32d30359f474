pub mod auth;
pub mod availability;
pub mod health;
pub mod promo_code;
pub mod reservation;
pub mod slot_config;

use crate::state::AppState;
use std::sync::Arc;
use tracing::warn;

// Mail failures never fail the request; the database row is the source of
// truth and the relay can be retried out of band.
pub(crate) async fn send_mail(
    state: &Arc<AppState>,
    recipient: &str,
    subject: &str,
    template: &str,
    ctx: &tera::Context,
) {
    match state.templates.render(template, ctx) {
        Ok(body) => {
            if let Err(e) = state.email_service.send(recipient, subject, &body).await {
                warn!("Failed to send {} to {}: {:?}", template, recipient, e);
            }
        }
        Err(e) => warn!("Failed to render {}: {}", template, e),
    }
}
