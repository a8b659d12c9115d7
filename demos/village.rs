use std::sync::{Arc, Mutex};

use rumor_mill::gossip::GossipOutcome;
use rumor_mill::npc::{Category, Position};
use rumor_mill::routing::{Graph, shortest_paths_from};
use rumor_mill::scheduler::RoundEvent;
use rumor_mill::sim::{Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("rumor_mill=info")))
        .init();

    let config = SimulationConfig::from_json(r#"{"round": {"run_time": 10.0}, "seed": 7}"#).unwrap();
    let mut sim = Simulation::new(config);
    sim.initialize();
    sim.populate(60, 40.0);

    let rumors: Arc<Mutex<Vec<u64>>> = Arc::default();
    let at_start = rumors.clone();
    sim.add_start_callback(
        Box::new(move |event: &RoundEvent| at_start.lock().unwrap().push(event.round)),
        0.0,
    )
    .unwrap();

    // One rumor per round, from a different corner of the village each time.
    let corners = [
        Position::new(0.0, 0.0, 0.0),
        Position::new(30.0, 0.0, 30.0),
        Position::new(-30.0, 0.0, 10.0),
    ];
    let mut spread = 0;
    for _ in 0..400 {
        sim.tick(0.1);
        let started = rumors.lock().unwrap().pop();
        if let Some(round) = started {
            let origin = corners[(round as usize) % corners.len()];
            let report = sim.trigger_gossip(0.6, 0.3, 0.8, origin);
            spread += usize::from(report.outcome != GossipOutcome::DiedOut);
            eprintln!(
                "round {round}: magnitude={:.2} outcome={:?} listeners={}",
                report.magnitude, report.outcome, report.updated
            );
        }
    }

    let mut fear = [0.0; Category::ALL.len()];
    let mut count = [0usize; Category::ALL.len()];
    for (_, npc) in sim.roster().iter() {
        let slot = npc.category() as usize;
        fear[slot] += npc.opinion().fear;
        count[slot] += 1;
    }
    eprintln!("{spread} rumors spread in {:.1} time units", sim.now());
    for (i, category) in Category::ALL.iter().enumerate() {
        if count[i] > 0 {
            eprintln!("{category:?}: {} npcs, mean fear {:.3}", count[i], fear[i] / count[i] as f64);
        }
    }

    // Streets between the three rumor origins (vertices 0 to 2) and the well.
    let places = ["square", "east corner", "west corner", "well"];
    let mut streets = Graph::new(places.len());
    streets.add_undirected_edge(0, 1, 42).unwrap();
    streets.add_undirected_edge(0, 2, 32).unwrap();
    streets.add_undirected_edge(1, 3, 10).unwrap();
    streets.add_undirected_edge(2, 3, 35).unwrap();
    let paths = shortest_paths_from(&streets, 3).unwrap();
    for target in 0..3 {
        let route: Option<Vec<&str>> = paths
            .path_to(target)
            .map(|path| path.into_iter().map(|v| places[v]).collect());
        eprintln!(
            "{} -> {}: cost {:?} via {:?}",
            places[3],
            places[target],
            paths.distance_to(target),
            route
        );
    }
}
