pub mod app;
pub mod handler;
pub mod page;
pub mod schema;

pub use app::{create_router, AppState};

use crate::utils::error::Result;

pub async fn serve(state: AppState, listen_addr: &str) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!("🌐 Booking form listening on http://{}", listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
