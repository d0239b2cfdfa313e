use redb::TableDefinition;

/// Board state table: storage key -> persisted board blob (JSON)
pub const BOARD_STATE: TableDefinition<&str, &[u8]> = TableDefinition::new("board_state");
