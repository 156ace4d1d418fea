//! Integration tests for the Simulation tick loop
//!
//! These tests drive the full generator -> belt -> sale -> currency cycle
//! with synthetic timestamps.

use tycoon_core_rs::orchestrator::{BeltConfig, Simulation, SimulationConfig};
use tycoon_core_rs::{EconomyError, Event, ManualClock, UpgradeKind};

/// Helper: simulation anchored at t=0 with the given config
fn create_simulation(config: SimulationConfig) -> Simulation {
    Simulation::new(config, ManualClock::new(0.0)).unwrap()
}

fn rich_config(money: f64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.economy.starting_money = money;
    config
}

#[test]
fn test_initial_state() {
    let sim = Simulation::with_defaults(ManualClock::new(0.0));

    assert!(sim.is_running());
    assert_eq!(sim.current_tick(), 0);
    assert_eq!(sim.money(), 100.0);
    assert_eq!(sim.object_price(), 10.0);
    assert_eq!(sim.drop_interval(), 2.0);
    assert_eq!(sim.belt_speed(), 1.0);
    assert_eq!(sim.belt_length(), 10.0);
    assert!(sim.items().is_empty());
    assert_eq!(sim.dropper_upgrade_cost(), 50.0);
    assert_eq!(sim.conveyor_upgrade_cost(), 50.0);
    assert_eq!(sim.price_upgrade_cost(), 100.0);
    assert!(sim.event_log().is_empty());
}

#[test]
fn test_tick_reports_drop() {
    let mut sim = create_simulation(SimulationConfig::default());

    assert!(!sim.tick(0.05));
    assert!(!sim.tick(1.95));
    assert!(sim.tick(2.0));
    assert!(!sim.tick(2.05));

    assert_eq!(sim.items().len(), 1);
    assert_eq!(sim.current_tick(), 4);
}

#[test]
fn test_step_result_fields() {
    let mut sim = create_simulation(SimulationConfig::default());

    let first = sim.step(1.0);
    assert_eq!(first.tick, 0);
    assert_eq!(first.dt, 1.0);
    assert!(!first.dropped);
    assert_eq!(first.sold, 0);
    assert_eq!(first.revenue, 0.0);

    let second = sim.step(2.0);
    assert_eq!(second.tick, 1);
    assert!(second.dropped);
}

#[test]
fn test_item_travels_and_sells() {
    let mut config = SimulationConfig::default();
    config.belt = BeltConfig {
        speed: 1.0,
        length: 5.0,
    };
    let mut sim = create_simulation(config);

    // Drop at t=2; the drop frame moves it by dt=2
    assert!(sim.tick(2.0));
    assert_eq!(sim.item_positions(), vec![2.0]);

    // t=4 is also a drop; both items ride this frame's dt
    assert!(sim.tick(4.0));
    assert_eq!(sim.item_positions(), vec![4.0, 2.0]);

    // t=5: first item reaches the end and is sold
    let result = sim.step(5.0);
    assert_eq!(result.sold, 1);
    assert_eq!(result.revenue, 10.0);
    assert_eq!(sim.money(), 110.0);
    assert_eq!(sim.item_positions(), vec![3.0]);
}

#[test]
fn test_sale_uses_current_price() {
    let mut config = rich_config(0.0);
    config.economy.object_price = 25.0;
    config.belt.length = 1.0;
    let mut sim = create_simulation(config);

    // Dropped at t=2 and carried straight past the end of a length-1 belt
    let result = sim.step(2.0);
    assert!(result.dropped);
    assert_eq!(result.sold, 1);
    assert_eq!(sim.money(), 25.0);
    assert!(sim.items().is_empty());
}

#[test]
fn test_no_item_left_past_belt_end() {
    let mut sim = create_simulation(SimulationConfig::default());

    let mut now = 0.0;
    for _ in 0..2000 {
        now += 0.05;
        sim.tick(now);
        for position in sim.item_positions() {
            assert!(position < sim.belt_length());
        }
    }
    assert!(sim.stats().items_sold > 0);
}

#[test]
fn test_purchase_dropper_insufficient_funds() {
    let mut sim = create_simulation(rich_config(10.0));

    assert!(!sim.purchase_dropper_upgrade());
    assert_eq!(sim.money(), 10.0);
    assert_eq!(sim.drop_interval(), 2.0);
    assert_eq!(sim.dropper_upgrade_cost(), 50.0);

    let rejected = sim.event_log().events_of_type("UpgradeRejected");
    assert_eq!(rejected.len(), 1);
}

#[test]
fn test_purchase_dropper_success() {
    let mut sim = create_simulation(rich_config(1000.0));

    assert!(sim.purchase_dropper_upgrade());
    assert_eq!(sim.money(), 950.0);
    assert!((sim.drop_interval() - 1.9).abs() < 1e-12);
    assert_eq!(sim.dropper_upgrade_cost(), 75.0);
}

#[test]
fn test_purchase_conveyor_and_price() {
    let mut sim = create_simulation(rich_config(1000.0));

    assert!(sim.purchase_conveyor_upgrade());
    assert_eq!(sim.belt_speed(), 1.5);
    assert_eq!(sim.conveyor_upgrade_cost(), 75.0);

    assert!(sim.purchase_price_upgrade());
    assert_eq!(sim.object_price(), 15.0);
    assert_eq!(sim.price_upgrade_cost(), 150.0);

    assert_eq!(sim.money(), 850.0);
    assert_eq!(sim.stats().upgrades_purchased, 2);
}

#[test]
fn test_purchase_detail() {
    let mut sim = create_simulation(rich_config(60.0));

    let receipt = sim.purchase(UpgradeKind::Dropper).unwrap();
    assert_eq!(receipt.balance, 10.0);

    let err = sim.purchase(UpgradeKind::Dropper).unwrap_err();
    assert_eq!(
        err,
        EconomyError::InsufficientFunds {
            kind: UpgradeKind::Dropper,
            required: 75.0,
            available: 10.0,
        }
    );
}

#[test]
fn test_dropper_upgrades_floor_at_minimum() {
    let mut sim = create_simulation(rich_config(1e12));

    for _ in 0..40 {
        assert!(sim.purchase_dropper_upgrade());
    }
    assert_eq!(sim.drop_interval(), 0.1);
}

#[test]
fn test_upgraded_belt_sells_sooner() {
    let mut sim = create_simulation(rich_config(50.0));
    assert!(sim.purchase_conveyor_upgrade());

    // Drop at 2 (moved 3.0), then 5s at speed 1.5 carries it to 10.5
    sim.tick(2.0);
    assert_eq!(sim.item_positions(), vec![3.0]);
    let result = sim.step(7.0);
    assert_eq!(result.sold, 1);
    assert_eq!(sim.money(), 10.0);
}

#[test]
fn test_events_logged_in_order() {
    let mut config = rich_config(100.0);
    config.belt.length = 1.0;
    let mut sim = create_simulation(config);

    sim.tick(2.0);
    sim.purchase_price_upgrade();
    sim.stop();

    let types: Vec<&str> = sim
        .event_log()
        .events()
        .iter()
        .map(Event::event_type)
        .collect();
    assert_eq!(types, vec!["Drop", "Sale", "UpgradePurchased", "Stopped"]);

    match &sim.event_log().events()[1] {
        Event::Sale {
            tick,
            count,
            revenue,
            balance,
        } => {
            assert_eq!(*tick, 0);
            assert_eq!(*count, 1);
            assert_eq!(*revenue, 10.0);
            assert_eq!(*balance, 110.0);
        }
        other => panic!("expected Sale, got {:?}", other),
    }
}

#[test]
fn test_stop_is_idempotent() {
    let mut sim = create_simulation(SimulationConfig::default());
    sim.stop();
    sim.stop();

    assert!(!sim.is_running());
    assert_eq!(sim.event_log().events_of_type("Stopped").len(), 1);
}

#[test]
fn test_drain_events() {
    let mut sim = create_simulation(SimulationConfig::default());
    sim.tick(2.0);

    let events = sim.drain_events();
    assert_eq!(events, vec![Event::Drop { tick: 0, at: 2.0 }]);
    assert!(sim.event_log().is_empty());
}

#[test]
fn test_view_snapshot() {
    let mut sim = create_simulation(SimulationConfig::default());
    sim.tick(2.0);
    sim.tick(2.5);

    let view = sim.view();
    assert_eq!(view.tick, 2);
    assert!(view.running);
    assert_eq!(view.money, 100.0);
    assert_eq!(view.drop_rate, 0.5);
    // Last drop at 2.0, last tick at 2.5, interval 2
    assert_eq!(view.next_drop_in, 1.5);
    assert_eq!(view.item_positions, vec![2.5]);
    assert_eq!(view.stats.items_dropped, 1);

    let json = view.to_json().unwrap();
    assert!(json.contains("\"item_positions\":[2.5]"));
}

#[test]
fn test_invalid_config_rejected() {
    let mut config = SimulationConfig::default();
    config.belt.length = -1.0;
    assert!(Simulation::new(config, ManualClock::new(0.0)).is_err());
}

#[test]
fn test_draining_driver_keeps_log_bounded() {
    let mut sim = create_simulation(SimulationConfig::default());

    // One hour of 50ms frames, draining after each like a GUI loop
    let mut now = 0.0;
    let mut drained = 0;
    for _ in 0..72_000 {
        now += 0.05;
        sim.tick(now);
        drained += sim.drain_events().len();
        assert!(sim.event_log().is_empty());
    }
    assert!(drained >= sim.stats().items_dropped);
    assert!(sim.stats().items_sold > 0);
}
