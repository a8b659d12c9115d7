pub mod ecs;
pub mod error;
pub mod gossip;
pub mod npc;
pub mod procgen;
pub mod queue;
pub mod routing;
pub mod scheduler;
pub mod sim;

pub use error::{GraphError, QueueError, SimError};
pub use gossip::{GossipConfig, GossipEvent, GossipOutcome, GossipReport};
pub use npc::{Category, CategoryMask, Npc, NpcId, NpcTraits, Opinion, Position, Roster};
pub use queue::{AnyQueue, IndexedHeap, OrderedQueue, PriorityQueue, QueueMode};
pub use routing::{Graph, ShortestPaths, UNREACHABLE, shortest_paths_from};
pub use scheduler::{Phase, RoundCallback, RoundConfig, RoundEvent, RoundScheduler};
pub use sim::{Simulation, SimulationConfig};
