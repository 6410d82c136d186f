/// The number of possible live-neighbor counts, `0..=8`.
const NEIGHBOR_COUNTS: usize = 9;
type RuleTable = [[bool; NEIGHBOR_COUNTS]; 2];

/// Lookup table for the Game of Life ruleset (B3/S23).
///
/// Indexed by `[alive as usize][live_neighbors]`.
static RULE_TABLE: RuleTable = generate_rule_table();

/// Returns the next state of a cell given its current state and live-neighbor count.
#[inline]
pub(crate) fn next_state(alive: bool, neighbors: usize) -> bool {
    debug_assert!(neighbors < NEIGHBOR_COUNTS, "a cell has at most 8 neighbors");
    RULE_TABLE[alive as usize][neighbors]
}

const fn generate_rule_table() -> RuleTable {
    let mut table = [[false; NEIGHBOR_COUNTS]; 2];
    let mut neighbors = 0;
    while neighbors < NEIGHBOR_COUNTS {
        // dead: born on exactly 3
        table[0][neighbors] = neighbors == 3;
        // alive: survives on 2 or 3
        table[1][neighbors] = neighbors == 2 || neighbors == 3;
        neighbors += 1;
    }
    table
}
