//! Local Persistence
//!
//! Synchronous localStorage read/write for the board and the template list,
//! plus JSON export/import helpers. Storage failures are logged to the
//! console and never surfaced: the in-memory mutation already committed.

use wasm_bindgen::{JsCast, JsValue};

use kanban_core::{reduce, Board, BoardAction, CardDraft, ColumnPatch, Priority, TemplateStore};

pub const BOARD_KEY: &str = "kanban-board";
pub const TEMPLATES_KEY: &str = "kanban-templates";

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

pub fn load_board() -> Option<Board> {
    let raw = local_storage()?.get_item(BOARD_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(board) => Some(board),
        Err(e) => {
            // No migration logic: an unreadable shape falls back to defaults.
            web_sys::console::error_1(
                &format!("[STORAGE] stored board failed to parse: {e}").into(),
            );
            None
        }
    }
}

pub fn save_board(board: &Board) {
    save_value(BOARD_KEY, board);
}

pub fn load_templates() -> Option<TemplateStore> {
    let raw = local_storage()?.get_item(TEMPLATES_KEY).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(templates) => Some(templates),
        Err(e) => {
            web_sys::console::error_1(
                &format!("[STORAGE] stored templates failed to parse: {e}").into(),
            );
            None
        }
    }
}

pub fn save_templates(templates: &TemplateStore) {
    save_value(TEMPLATES_KEY, templates);
}

fn save_value<T: serde::Serialize>(key: &str, value: &T) {
    let Some(store) = local_storage() else {
        return;
    };
    match serde_json::to_string(value) {
        Ok(json) => {
            // set_item fails on quota exhaustion; log and move on.
            if store.set_item(key, &json).is_err() {
                web_sys::console::error_1(&format!("[STORAGE] write failed for {key}").into());
            }
        }
        Err(e) => {
            web_sys::console::error_1(&format!("[STORAGE] serialize failed for {key}: {e}").into());
        }
    }
}

/// First-launch board: three columns and a couple of cards so the UI is not
/// an empty screen.
pub fn sample_board() -> Board {
    let mut board = Board::new();
    for title in ["To Do", "In Progress", "Done"] {
        board = reduce(&board, BoardAction::AddColumn { title: title.to_string() });
    }
    let todo = board.column_order[0].clone();
    let doing = board.column_order[1].clone();
    board = reduce(
        &board,
        BoardAction::EditColumn {
            column_id: doing.clone(),
            patch: ColumnPatch {
                wip_limit: Some(Some(3)),
                ..ColumnPatch::default()
            },
        },
    );
    board = reduce(
        &board,
        BoardAction::AddCard {
            column_id: todo,
            draft: CardDraft {
                title: "Try dragging this card".into(),
                description: "Cards can be dragged between columns; columns can be reordered by their headers.".into(),
                priority: Priority::Medium,
                tags: vec!["getting-started".into()],
                ..CardDraft::default()
            },
        },
    );
    board = reduce(
        &board,
        BoardAction::AddCard {
            column_id: doing,
            draft: CardDraft {
                title: "Set a WIP limit".into(),
                description: "This column is capped at 3 cards.".into(),
                priority: Priority::High,
                tags: vec!["getting-started".into()],
                story_points: Some(2),
                ..CardDraft::default()
            },
        },
    );
    board
}

// ========================
// Export / import
// ========================

/// Download the board as a JSON blob.
pub fn export_board(board: &Board) -> Result<(), String> {
    let json = serde_json::to_string_pretty(board).map_err(|e| e.to_string())?;

    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&json));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");
    let blob = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options)
        .map_err(|_| "failed to build blob".to_string())?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)
        .map_err(|_| "failed to create object url".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| "no document".to_string())?;
    let anchor = document
        .create_element("a")
        .map_err(|_| "failed to create anchor".to_string())?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| "not an anchor".to_string())?;
    anchor.set_href(&url);
    anchor.set_download("kanban-board.json");
    anchor.click();
    let _ = web_sys::Url::revoke_object_url(&url);
    Ok(())
}

/// Read a user-chosen file as text (import path).
pub async fn read_file_text(file: web_sys::File) -> Result<String, String> {
    let text = wasm_bindgen_futures::JsFuture::from(file.text())
        .await
        .map_err(|_| "failed to read file".to_string())?;
    text.as_string().ok_or_else(|| "file is not text".to_string())
}

/// Best-effort parse of an exported board. No schema check beyond the shape.
pub fn parse_board(json: &str) -> Result<Board, String> {
    serde_json::from_str(json).map_err(|e| e.to_string())
}
