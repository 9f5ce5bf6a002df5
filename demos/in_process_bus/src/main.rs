//! in-process-bus — a minimal mpsc-based wiring of `TimeService`,
//! `ResourceAgent`, and `Dispatcher` across OS threads.
//!
//! Models a two-principal BSPL protocol: a `seller` whose `pack_order`
//! handler is routed to a two-member `packer` resource pool. `main`
//! injects two orders at startup, then drives the round loop until every
//! dispatched task has completed and every participant passivates.
//!
//! This is scaffolding, not protocol logic — swap the channels here for a
//! real UDP adapter and every `rt-*` crate is unchanged.

use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use anyhow::Result;

use rt_core::{AgentName, CompleteTask, GiveTask, RoundId, RunRng, TimeUpdate, VirtualTime};
use rt_directory::{AgentDirectory, DirectoryBuilder, Endpoint, PoolStrategy, ResourcePools, TaskRoutingTable};
use rt_dispatch::{Dispatcher, DispatchContext, Effect, Handler, Message};
use rt_output::{RunObserver, TracingObserver};
use rt_resource::ResourceAgent;
use rt_schedule::RoundReply;
use rt_timeservice::TimeServiceBuilder;

const RUN_SEED: u64 = 42;
const SELLER: &str = "seller";
const PACKERS: [&str; 2] = ["packer_ra_1", "packer_ra_2"];

const RUN_CONFIG_TOML: &str = "\
simulation_id = \"pack_and_ship\"\n\
run_id = 1\n\
start_time_days = 0.0\n\
max_rounds = 20\n\
round_timeout_secs = 5\n\
liveness_warn_after = 5\n\
";

/// Everything that can arrive on a participant's inbox.
enum Wire {
    TimeUpdate(TimeUpdate),
    GiveTask(GiveTask),
    CompleteTask(CompleteTask),
    /// Demo-only kickoff, standing in for an inbound BSPL message from a
    /// `buyer` this workspace does not model.
    PlaceOrder { case_id: String },
}

/// A participant's reply to the current round, addressed back to the
/// `TimeService` thread.
enum RoundMessage {
    Hold { agent_name: AgentName, round_id: String, next_time: VirtualTime },
    Passivate { agent_name: AgentName, round_id: String },
}

struct SellerHandler;

impl Handler for SellerHandler {
    fn on_message(&self, message: &Message, ctx: &DispatchContext<'_>) -> Vec<Effect> {
        tracing::info!(case_id = ctx.case_id, message_type = %message.message_type, "order packed, seller handler ran");
        vec![]
    }
}

fn demo_directory() -> rt_directory::DirectoryResult<rt_directory::Directory> {
    DirectoryBuilder::new()
        .agent(SELLER, Endpoint::new("127.0.0.1", 9001), &["Agent"])
        .agent(PACKERS[0], Endpoint::new("127.0.0.1", 9101), &["Agent"])
        .agent(PACKERS[1], Endpoint::new("127.0.0.1", 9102), &["Agent"])
        .pool(
            SELLER,
            "pack",
            vec![AgentName::from(PACKERS[0]), AgentName::from(PACKERS[1])],
            PoolStrategy::RoundRobin,
        )
        .route(
            "pack_order",
            "pack",
            SELLER,
            rt_core::DurationSpec::fixed(2.0).expect("2.0 is a valid fixed duration"),
        )
        .build()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let run_config = rt_schedule::load_run_config_str(RUN_CONFIG_TOML)?;
    println!(
        "=== {} (run {}) ===",
        run_config.simulation_id, run_config.run_id.0
    );

    let directory = demo_directory()?;
    let rt_directory::Directory { agents, pools, routes } = directory;

    let time_service = TimeServiceBuilder::new()
        .directory(agents)
        .resource_agent(AgentName::from(PACKERS[0]))
        .resource_agent(AgentName::from(PACKERS[1]))
        .max_rounds(run_config.max_rounds)
        .round_timeout(run_config.round_timeout)
        .liveness_warn_after(run_config.liveness_warn_after)
        .build()?;

    let (round_tx, round_rx): (Sender<RoundMessage>, Receiver<RoundMessage>) = mpsc::channel();

    let mut wire_senders: HashMap<AgentName, Sender<Wire>> = HashMap::new();
    let mut receivers: HashMap<AgentName, Receiver<Wire>> = HashMap::new();
    for name in std::iter::once(SELLER).chain(PACKERS) {
        let (tx, rx) = mpsc::channel();
        wire_senders.insert(AgentName::from(name), tx);
        receivers.insert(AgentName::from(name), rx);
    }

    let mut join_handles = Vec::new();

    let seller_rx = receivers.remove(&AgentName::from(SELLER)).expect("seller channel registered above");
    {
        let round_tx = round_tx.clone();
        let ra_senders: HashMap<AgentName, Sender<Wire>> = PACKERS
            .iter()
            .map(|name| (AgentName::from(*name), wire_senders[&AgentName::from(*name)].clone()))
            .collect();
        join_handles.push(thread::spawn(move || run_seller(seller_rx, round_tx, routes, pools, ra_senders)));
    }

    for name in PACKERS {
        let rx = receivers.remove(&AgentName::from(name)).expect("RA channel registered above");
        let round_tx = round_tx.clone();
        let agent_name = AgentName::from(name);
        let seller_sender = wire_senders[&AgentName::from(SELLER)].clone();
        join_handles.push(thread::spawn(move || {
            run_resource_agent(agent_name, AgentName::from(SELLER), rx, round_tx, seller_sender)
        }));
    }
    drop(round_tx);

    wire_senders[&AgentName::from(SELLER)].send(Wire::PlaceOrder { case_id: "case_1".to_string() })?;
    wire_senders[&AgentName::from(SELLER)].send(Wire::PlaceOrder { case_id: "case_2".to_string() })?;

    let mut observer = TracingObserver;
    let mut service = time_service;
    loop {
        observer.on_round_start(service.round(), service.now());
        let broadcast = service.broadcast();
        let send_phase = |updates: Vec<TimeUpdate>| {
            for update in updates {
                let Some(round_id) = RoundId::parse(&update.round_id) else {
                    tracing::error!(round_id = %update.round_id, "broadcast produced an unparseable round_id, skipping");
                    continue;
                };
                let name = AgentName::from(round_id.agent.as_str());
                if let Some(sender) = wire_senders.get(&name) {
                    let _ = sender.send(Wire::TimeUpdate(update));
                }
            }
        };
        send_phase(broadcast.business);
        thread::sleep(service.round_gap());
        send_phase(broadcast.resource_agents);

        let deadline = service.round_timeout();
        let mut elapsed = Duration::ZERO;
        while !service.is_round_complete() && elapsed < deadline {
            let start = std::time::Instant::now();
            match round_rx.recv_timeout(deadline - elapsed) {
                Ok(RoundMessage::Hold { agent_name, round_id, next_time }) => {
                    service.handle_hold(agent_name, &round_id, next_time);
                }
                Ok(RoundMessage::Passivate { agent_name, round_id }) => {
                    service.handle_passivate(agent_name, &round_id);
                }
                Err(_) => break,
            }
            elapsed += start.elapsed();
        }

        let outcome = if service.is_round_complete() {
            service.advance()
        } else {
            match service.check_watchdog(deadline) {
                Some(watchdog) => {
                    for agent in &watchdog.evicted {
                        observer.on_eviction(agent.as_str(), service.round());
                    }
                    watchdog.advance.expect("watchdog always advances or terminates")
                }
                None => service.advance(),
            }
        };

        observer.on_round_end(outcome.round, outcome.now);
        if outcome.finished {
            break;
        }
    }

    drop(wire_senders);
    for handle in join_handles {
        let _ = handle.join();
    }

    observer.on_run_end(service.round(), service.now());
    println!("Run finished at round {} / T={}", service.round(), service.now());
    Ok(())
}

fn run_seller(
    rx: Receiver<Wire>,
    round_tx: Sender<RoundMessage>,
    routes: TaskRoutingTable,
    pools: ResourcePools,
    ra_senders: HashMap<AgentName, Sender<Wire>>,
) {
    let mut dispatcher = Dispatcher::new(routes, pools);
    let mut rng = RunRng::new(RUN_SEED);
    let handler = SellerHandler;
    let agent_name = AgentName::from(SELLER);
    let mut observer = TracingObserver;

    while let Ok(wire) = rx.recv() {
        match wire {
            Wire::TimeUpdate(update) => {
                let round_id = update.round_id.clone();
                let _ = round_tx.send(RoundMessage::Passivate { agent_name: agent_name.clone(), round_id });
            }
            Wire::PlaceOrder { case_id } => {
                let message = Message::new("order").with_case_id(case_id);
                match dispatcher.dispatch("pack_order", message, &handler, &mut rng) {
                    Ok(effects) => apply_effects(effects, &ra_senders, &mut observer),
                    Err(err) => tracing::error!(%err, "dispatch failed"),
                }
            }
            Wire::CompleteTask(complete) => {
                observer.on_task_complete(&complete.task_id, &complete.case_id, &complete.task_type);
                let effects = dispatcher.complete(&complete.task_id, &handler);
                apply_effects(effects, &ra_senders, &mut observer);
            }
            Wire::GiveTask(_) => unreachable!("seller never receives a GiveTask"),
        }
    }
}

/// Carry out the effects a dispatched or resumed handler call produced —
/// the "apply" half of the decide/apply split `rt-dispatch` documents. A
/// real transport would serialize `GiveTask`/`Reply`; here delivery is a
/// direct channel send since every participant lives in this process.
fn apply_effects(effects: Vec<Effect>, ra_senders: &HashMap<AgentName, Sender<Wire>>, observer: &mut TracingObserver) {
    for effect in effects {
        match effect {
            Effect::GiveTask { ra, give_task } => {
                observer.on_task_given(&give_task.task_id, &give_task.case_id, &give_task.task_type, ra.as_str());
                if let Some(sender) = ra_senders.get(&ra) {
                    let _ = sender.send(Wire::GiveTask(give_task));
                }
            }
            Effect::Reply { to, message } => {
                tracing::info!(%to, message_type = %message.message_type, "dispatcher issued a reply (no buyer modeled in this demo)");
            }
            Effect::Resume { task_id, .. } => tracing::info!(%task_id, "dispatcher resumed a suspended call"),
        }
    }
}

fn run_resource_agent(
    name: AgentName,
    principal: AgentName,
    rx: Receiver<Wire>,
    round_tx: Sender<RoundMessage>,
    principal_sender: Sender<Wire>,
) {
    let directory = single_principal_directory(&principal);
    let mut agent = ResourceAgent::new(name.clone(), principal, RUN_SEED);
    let mut observer = TracingObserver;

    while let Ok(wire) = rx.recv() {
        match wire {
            Wire::TimeUpdate(update) => {
                let round_id = update.round_id.clone();
                let outcome = agent.on_time_update(update.now, &directory);
                if let Some(started) = outcome.started {
                    observer.on_task_started(&started.task_id, &started.case_id, &started.task_type, name.as_str());
                }
                if let Some((_endpoint, complete_task)) = outcome.completed {
                    tracing::info!(ra = %name, task_id = %complete_task.task_id, "task completed");
                    let _ = principal_sender.send(Wire::CompleteTask(complete_task));
                }
                let reply = agent.on_reminder(update.now);
                let message = match reply {
                    RoundReply::Hold(next_time) => {
                        RoundMessage::Hold { agent_name: name.clone(), round_id, next_time }
                    }
                    RoundReply::Passivate => RoundMessage::Passivate { agent_name: name.clone(), round_id },
                };
                let _ = round_tx.send(message);
            }
            Wire::GiveTask(give_task) => {
                agent.give_task(give_task.task_id, give_task.case_id, give_task.task_type, give_task.duration);
            }
            Wire::CompleteTask(_) | Wire::PlaceOrder { .. } => {
                unreachable!("a resource agent only receives TimeUpdate and GiveTask")
            }
        }
    }
}

/// The directory view a resource agent needs at runtime is just its own
/// principal's endpoint, for completion addressing (spec.md §4.2).
fn single_principal_directory(principal: &AgentName) -> AgentDirectory {
    let mut dir = AgentDirectory::new();
    dir.register(principal.clone(), Endpoint::new("127.0.0.1", 9001), &["Agent"]);
    dir
}
