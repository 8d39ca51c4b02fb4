//! Remote score bootstrap.
//!
//! One game dashboard seeds its `gamesWon` counter from a static JSON
//! endpoint shaped `{"score": n}`. The locally persisted value always
//! wins when present; otherwise the endpoint is fetched once and the
//! result persisted, falling back to 0 on any failure. Fetch errors are
//! logged and recovered here, never surfaced to the move-handling core.

use crate::counters::CounterStore;
use serde::Deserialize;

/// Counter key shared by the games that report to the dashboard.
pub const GAMES_WON_KEY: &str = "gamesWon";

#[derive(Debug, Deserialize)]
struct ScorePayload {
    score: u64,
}

async fn fetch_score(url: &str) -> Result<u64, reqwest::Error> {
    let payload: ScorePayload = reqwest::get(url).await?.json().await?;
    Ok(payload.score)
}

/// Initial `gamesWon` value: the stored count when one exists, otherwise
/// the remote score (persisted after the fetch), otherwise 0.
pub async fn bootstrap_games_won(store: &mut dyn CounterStore, url: &str) -> u64 {
    if store.contains(GAMES_WON_KEY) {
        return store.get(GAMES_WON_KEY);
    }
    refetch_games_won(store, url).await
}

/// Unconditionally re-fetches the remote score and overwrites the stored
/// count with it (the dashboard's reset action).
pub async fn refetch_games_won(store: &mut dyn CounterStore, url: &str) -> u64 {
    let score = match fetch_score(url).await {
        Ok(score) => score,
        Err(err) => {
            tracing::warn!(url, %err, "score fetch failed, defaulting to 0");
            0
        }
    };
    store.set(GAMES_WON_KEY, score);
    score
}
