//! Board topology endpoint

use axum::Json;
use kalah_core::{opposite_pit, Player, NUM_PITS, PITS_PER_SIDE, PLAYER1_STORE, PLAYER2_STORE};
use serde::Serialize;

#[derive(Serialize)]
pub struct BoardInfo {
    pub num_pits: usize,
    pub pits_per_side: usize,
    pub stores: [usize; 2],
    pub player1_pits: Vec<usize>,
    pub player2_pits: Vec<usize>,
    /// `[pit, opposite]` for every sowing pit
    pub opposite: Vec<[usize; 2]>,
}

/// Get board topology
pub async fn get_board() -> Json<BoardInfo> {
    let player1_pits: Vec<usize> = Player::Player1.pits().collect();
    let player2_pits: Vec<usize> = Player::Player2.pits().collect();
    let opposite = player1_pits
        .iter()
        .chain(&player2_pits)
        .map(|&pit| [pit, opposite_pit(pit)])
        .collect();

    Json(BoardInfo {
        num_pits: NUM_PITS,
        pits_per_side: PITS_PER_SIDE,
        stores: [PLAYER1_STORE, PLAYER2_STORE],
        player1_pits,
        player2_pits,
        opposite,
    })
}
