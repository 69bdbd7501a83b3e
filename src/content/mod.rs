//! The paper and slide deck, and the lazy lookups that seed them into the
//! store on first read.

pub mod paper;
pub mod presentation;

use sqlx::SqlitePool;

use crate::db::{self, StoreError};
use crate::models::{Presentation, Reference, WhitePaper, WhitePaperSection};

pub use paper::{PAPER_TITLE, build_whitepaper};
pub use presentation::{PRESENTATION_TITLE, build_presentation};

pub async fn fetch_whitepaper(pool: &SqlitePool) -> Result<WhitePaper, StoreError> {
    db::ensure_and_fetch(pool, PAPER_TITLE, || async {
        Ok::<_, StoreError>(build_whitepaper())
    })
    .await
}

/// The deck links to the stored paper, so a cold start seeds the paper first.
pub async fn fetch_presentation(pool: &SqlitePool) -> Result<Presentation, StoreError> {
    db::ensure_and_fetch(pool, PRESENTATION_TITLE, move || async move {
        let paper = fetch_whitepaper(pool).await?;
        Ok::<_, StoreError>(build_presentation(&paper.id))
    })
    .await
}

pub async fn fetch_sections(pool: &SqlitePool) -> Result<Vec<WhitePaperSection>, StoreError> {
    Ok(fetch_whitepaper(pool).await?.sections)
}

pub async fn fetch_references(pool: &SqlitePool) -> Result<Vec<Reference>, StoreError> {
    Ok(fetch_whitepaper(pool).await?.references)
}
