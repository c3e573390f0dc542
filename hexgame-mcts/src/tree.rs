//! MCTS Tree structure and node management
//!
//! Uses arena allocation: parents are indices, never owners.
//!
//! ## Architecture
//! - Level 2: Tree operations (select_leaf, expand, backpropagate)
//! - Level 3: UCT/RAVE scoring, node accessors
//! - Level 4: Statistics, utilities

use hexgame_core::board::cell_at;
use hexgame_core::{BoardState, Cell, Side};
use rustc_hash::FxHashMap;

// ============================================================================
// TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// Blend parameters for child selection
#[derive(Clone, Copy, Debug)]
pub struct SelectionParams {
    /// UCT exploration constant C
    pub exploration: f32,
    /// RAVE equivalence constant k in `beta = sqrt(k / (3n + k))`
    pub rave_k: f32,
}

/// Statistics for a tree node
#[derive(Clone, Debug, Default)]
pub struct NodeStats {
    /// Number of times this node was visited
    pub visits: u32,
    /// Signed outcome sum: +1 per red win, -1 per blue win
    pub wins: i32,
}

impl NodeStats {
    /// Mean outcome from red's perspective, in [-1, 1]
    pub fn mean(&self) -> f32 {
        if self.visits == 0 {
            0.0
        } else {
            self.wins as f32 / self.visits as f32
        }
    }
}

/// All-moves-as-first statistics for one move
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RaveStats {
    pub visits: u32,
    pub wins: u32,
}

/// A node in the MCTS tree
#[derive(Clone, Debug)]
pub struct MctsNode {
    /// Board at this node
    pub state: BoardState,
    /// Parent node (None for root)
    pub parent: Option<NodeId>,
    /// Move (cell index) that led to this node (None for root)
    pub incoming_move: Option<usize>,
    /// Children in creation order
    pub children: Vec<NodeId>,
    /// Move -> child, for O(1) duplicate checks
    pub lookup: FxHashMap<usize, NodeId>,
    /// Visit/win statistics
    pub stats: NodeStats,
    /// RAVE statistics keyed by move, credited by every rollout below this node
    pub rave: FxHashMap<usize, RaveStats>,
    /// Cached terminal flag
    terminal: bool,
}

impl MctsNode {
    pub fn new(state: BoardState, parent: Option<NodeId>, incoming_move: Option<usize>) -> Self {
        let terminal = state.available().is_empty() || state.winner().is_some();
        Self {
            state,
            parent,
            incoming_move,
            children: Vec::new(),
            lookup: FxHashMap::default(),
            stats: NodeStats::default(),
            rave: FxHashMap::default(),
            terminal,
        }
    }

    /// No moves left, or someone already connected
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// Every available move has a child
    pub fn is_fully_expanded(&self) -> bool {
        self.lookup.len() == self.state.available().len()
    }

    /// RAVE win rate for a move, 0 when unseen
    pub fn rave_score(&self, mv: usize) -> f32 {
        match self.rave.get(&mv) {
            Some(stats) if stats.visits > 0 => stats.wins as f32 / stats.visits as f32,
            _ => 0.0,
        }
    }

    /// Next move to expand: first available cell without a child
    fn untried_move(&self) -> Option<usize> {
        self.state
            .available()
            .iter()
            .find(|mv| !self.lookup.contains_key(mv))
    }
}

// ============================================================================
// MCTS TREE (Level 2 - Tree Operations)
// ============================================================================

/// MCTS search tree with arena allocation
#[derive(Debug)]
pub struct MctsTree {
    /// Arena storage for nodes
    nodes: Vec<MctsNode>,
}

impl MctsTree {
    /// Create a new tree with the given root state
    pub fn new(root_state: BoardState) -> Self {
        let root = MctsNode::new(root_state, None, None);
        Self { nodes: vec![root] }
    }

    /// Get the root node id
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a reference to a node
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0]
    }

    /// Get a mutable reference to a node
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0]
    }

    /// Get the number of nodes in the tree
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the tree empty?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Level 2: Tree Operations
    // ========================================================================

    /// Descend while the node is non-terminal and fully expanded
    pub fn select_leaf(&self, params: SelectionParams) -> NodeId {
        let mut current = self.root();

        loop {
            let node = self.get(current);
            if node.is_terminal() || !node.is_fully_expanded() {
                break;
            }
            match self.select_best_child(current, params) {
                Some(child) => current = child,
                None => break,
            }
        }

        current
    }

    /// Expand a node by adding one child
    ///
    /// Returns the new child's NodeId, or None if the node is terminal or
    /// fully expanded.
    pub fn expand(&mut self, node_id: NodeId) -> Option<NodeId> {
        let node = self.get(node_id);
        if node.is_terminal() {
            return None;
        }
        let mv = node.untried_move()?;
        let child_state = node.state.apply(mv);

        let child_id = NodeId(self.nodes.len());
        self.nodes.push(MctsNode::new(child_state, Some(node_id), Some(mv)));

        let parent = self.get_mut(node_id);
        parent.children.push(child_id);
        parent.lookup.insert(mv, child_id);

        Some(child_id)
    }

    // ========================================================================
    // Level 3: Selection Helpers
    // ========================================================================

    /// Select the child with the highest blended score; first wins ties
    fn select_best_child(&self, node_id: NodeId, params: SelectionParams) -> Option<NodeId> {
        let mut best: Option<(NodeId, f32)> = None;
        for &child in &self.get(node_id).children {
            let score = self.blended_score(node_id, child, params);
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((child, score));
            }
        }
        best.map(|(id, _)| id)
    }

    /// `beta * RAVE + (1 - beta) * UCT`, from the perspective of the side
    /// choosing at `parent_id`.
    ///
    /// Unvisited children score +infinity.
    pub fn blended_score(&self, parent_id: NodeId, child_id: NodeId, params: SelectionParams) -> f32 {
        let parent = self.get(parent_id);
        let child = self.get(child_id);
        let visits = child.stats.visits;

        if visits == 0 {
            return f32::INFINITY;
        }

        let sign = if parent.state.to_move() == Side::Red { 1.0 } else { -1.0 };
        let n = visits as f32;
        let exploitation = sign * child.stats.mean();
        let exploration =
            params.exploration * ((parent.stats.visits.max(1) as f32).ln() / n).sqrt();
        let uct = exploitation + exploration;

        let rave = child
            .incoming_move
            .map_or(0.0, |mv| parent.rave_score(mv));
        let beta = (params.rave_k / (3.0 * n + params.rave_k)).sqrt();

        beta * rave + (1.0 - beta) * uct
    }

    // ========================================================================
    // Level 2: Backpropagation
    // ========================================================================

    /// Backpropagate a rollout from `leaf_id` to the root
    ///
    /// `outcome` is +1 for a red win, -1 for a blue win, 0 for no winner.
    /// Every move in `rollout_moves` earns RAVE credit at each node on the
    /// path; a RAVE win counts when the outcome favors that node's mover.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: i32, rollout_moves: &[usize]) {
        let mut current = Some(leaf_id);

        while let Some(node_id) = current {
            let node = self.get_mut(node_id);
            node.stats.visits += 1;
            node.stats.wins += outcome;

            let favored = match node.state.to_move() {
                Side::Red => outcome > 0,
                Side::Blue => outcome < 0,
            };
            for &mv in rollout_moves {
                let entry = node.rave.entry(mv).or_default();
                entry.visits += 1;
                if favored {
                    entry.wins += 1;
                }
            }

            current = node.parent;
        }
    }

    // ========================================================================
    // Level 3: Best Move Selection
    // ========================================================================

    /// Get the best move from root (most visits, first on ties)
    pub fn best_move(&self) -> Option<Cell> {
        let mut best: Option<(NodeId, u32)> = None;
        for &child in &self.get(self.root()).children {
            let visits = self.get(child).stats.visits;
            if best.map_or(true, |(_, v)| visits > v) {
                best = Some((child, visits));
            }
        }
        best.and_then(|(id, _)| self.get(id).incoming_move)
            .map(cell_at)
    }

    /// Get all root moves with visit counts and red-perspective means
    pub fn move_statistics(&self) -> Vec<(Cell, u32, f32)> {
        self.get(self.root())
            .children
            .iter()
            .filter_map(|&id| {
                let node = self.get(id);
                node.incoming_move
                    .map(|mv| (cell_at(mv), node.stats.visits, node.stats.mean()))
            })
            .collect()
    }

    /// Get total simulations run (root visits)
    pub fn total_simulations(&self) -> u32 {
        self.get(self.root()).stats.visits
    }
}

// ============================================================================
// TESTS
// ============================================================================
