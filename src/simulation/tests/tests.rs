use super::*;
use crate::core::config::{BackendKind, FanOut, PARTITION_COUNT, TICK_SECONDS};
use crate::domain::{color_of, MedicineRecord};
use crate::spatial::Direction;

fn area(width: u32, height: u32, fan_out: FanOut) -> CellArea {
    let config = SimConfig {
        seed: Some(11),
        fan_out,
        ..SimConfig::default()
    };
    CellArea::with_geometry(width, height, config).expect("cell area")
}

/// Wipe the random population so a test controls every cell
fn all_healthy(area: &mut CellArea) {
    area.store.fill(CellType::Healthy);
    area.counts = CellCounts::tally(area.store.types(), PARTITION_COUNT);
}

fn medicine_cells(area: &CellArea) -> Vec<usize> {
    area.types()
        .iter()
        .enumerate()
        .filter(|(_, &t)| t == CellType::Medicine)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn corner_injection_seeds_three_neighbors() {
    let mut area = area(10, 10, FanOut::Fixed(3));
    all_healthy(&mut area);

    let origin = area.inject_medicine(area.positions()[0]);
    assert_eq!(origin, 0);
    area.step().expect("tick");

    assert_eq!(medicine_cells(&area), vec![1, 10, 11]);
    for (idx, dir) in [(1, Direction::East), (10, Direction::South), (11, Direction::SouthEast)] {
        assert_eq!(
            *area.store.medicine(idx),
            MedicineRecord::travelling(Some(CellType::Healthy), dir)
        );
    }
    assert_eq!(area.types()[0], CellType::Healthy);
    assert_eq!(area.counts().medicine, 3);
    assert_eq!(area.counts().healthy, 97);
}

#[test]
fn injected_medicine_travels_from_the_next_tick_and_stops_at_the_border() {
    let mut area = area(10, 10, FanOut::Fixed(3));
    all_healthy(&mut area);
    area.inject_medicine(area.positions()[0]);

    area.step().expect("tick");
    area.step().expect("tick");
    assert_eq!(medicine_cells(&area), vec![2, 20, 22]);

    for _ in 0..20 {
        area.step().expect("tick");
    }
    // east along row 0, south down column 0, diagonal to the far corner
    assert_eq!(medicine_cells(&area), vec![9, 90, 99]);
    for idx in [9, 90, 99] {
        assert_eq!(area.store.medicine(idx).previous_type, Some(CellType::Healthy));
    }
    assert_eq!(area.counts().medicine, 3);
}

#[test]
fn cure_clears_cancer_and_consumes_the_medicine() {
    let mut area = area(5, 5, FanOut::Fixed(1));
    all_healthy(&mut area);
    let center = 12;
    area.store.set_type(center, CellType::Cancer);
    let ring: Vec<_> = area.topology.neighbors(center).iter().map(|(_, n)| n).collect();
    for &n in ring.iter().take(6) {
        area.store
            .place_medicine(n, MedicineRecord::travelling(Some(CellType::Healthy), Direction::North));
    }

    area.step().expect("tick");

    assert!(area.types().iter().all(|&t| t == CellType::Healthy));
    assert_eq!(area.counts().healthy, 25);
}

#[test]
fn five_medicine_neighbors_leave_cancer_alone() {
    let mut area = area(5, 5, FanOut::Fixed(1));
    all_healthy(&mut area);
    let center = 12;
    area.store.set_type(center, CellType::Cancer);
    let ring: Vec<_> = area.topology.neighbors(center).iter().map(|(_, n)| n).collect();
    for &n in ring.iter().take(5) {
        area.store
            .place_medicine(n, MedicineRecord::travelling(Some(CellType::Healthy), Direction::North));
    }

    area.step().expect("tick");

    assert_eq!(area.types()[center], CellType::Cancer);
    assert_eq!(area.counts().medicine, 5);
    assert_eq!(area.counts().cancer, 1);
}

#[test]
fn healthy_cell_surrounded_by_cancer_turns() {
    let mut area = area(5, 5, FanOut::Fixed(1));
    all_healthy(&mut area);
    // three in the row above, three in the row below
    for idx in [6, 7, 8, 16, 17, 18] {
        area.store.set_type(idx, CellType::Cancer);
    }

    area.step().expect("tick");
    assert_eq!(area.types()[12], CellType::Cancer);
    // (0, 2) and (4, 2) only see two cancer cells each
    assert_eq!(area.types()[10], CellType::Healthy);
    assert_eq!(area.types()[14], CellType::Healthy);
}

#[test]
fn counts_cover_the_grid_every_tick() {
    let mut area = area(30, 30, FanOut::Random);
    for tick in 0..60 {
        let x = (tick * 7 % 30) as f32 * 2.5;
        let y = (tick * 11 % 30) as f32 * 2.5;
        area.inject_medicine([x, y]);
        area.step().expect("tick");

        let counts = area.counts();
        assert_eq!(counts.total(), 900, "tick {tick}");
        assert_eq!(counts, CellCounts::tally(area.types(), 1));
        for (t, c) in area.types().iter().zip(area.colors()) {
            assert_eq!(*c, color_of(*t));
        }
    }
}

#[test]
fn same_seed_same_history() {
    let mut a = area(24, 24, FanOut::Random);
    let mut b = area(24, 24, FanOut::Random);
    assert_eq!(a.types(), b.types());

    for tick in 0..25 {
        let point = [(tick % 24) as f32 * 2.5, 30.0];
        a.inject_medicine(point);
        b.inject_medicine(point);
        a.step().expect("tick");
        b.step().expect("tick");
    }
    assert_eq!(a.types(), b.types());
    assert_eq!(a.counts(), b.counts());
}

#[cfg(feature = "parallel")]
#[test]
fn partition_pool_and_offload_agree() {
    let config = |backend| SimConfig {
        seed: Some(21),
        backend,
        ..SimConfig::default()
    };
    let mut pooled = CellArea::with_geometry(32, 20, config(BackendKind::PartitionPool)).expect("pool");
    let mut offloaded = CellArea::with_geometry(32, 20, config(BackendKind::Offload)).expect("offload");
    assert_eq!(pooled.backend_name(), "partition_pool");
    assert_eq!(offloaded.backend_name(), "offload");

    for tick in 0..30 {
        if tick % 3 == 0 {
            let point = [(tick % 32) as f32 * 2.5, (tick % 20) as f32 * 2.5];
            pooled.inject_medicine(point);
            offloaded.inject_medicine(point);
        }
        pooled.step().expect("tick");
        offloaded.step().expect("tick");
        assert_eq!(pooled.types(), offloaded.types(), "tick {tick}");
    }
}

#[cfg(not(feature = "parallel"))]
#[test]
fn offload_refuses_to_start_without_parallel() {
    let config = SimConfig {
        backend: BackendKind::Offload,
        ..SimConfig::default()
    };
    let result = CellArea::with_geometry(8, 8, config);
    assert!(matches!(result, Err(SimError::Backend(_))));
}

#[test]
fn on_tick_runs_whole_ticks_only() {
    let mut area = area(8, 8, FanOut::Random);
    assert_eq!(area.on_tick(0.0).expect("tick"), 0);
    assert_eq!(area.on_tick(TICK_SECONDS * 3.5).expect("tick"), 3);
    assert_eq!(area.tick(), 3);
    assert_eq!(area.on_tick(TICK_SECONDS * 300.0).expect("tick"), 8);
    assert_eq!(area.tick(), 11);
}

#[test]
fn regenerate_reseeds_and_forgets_pending_injections() {
    let mut area = area(20, 20, FanOut::Random);
    area.step().expect("tick");
    area.inject_medicine([10.0, 10.0]);
    assert_eq!(area.pending_injections(), 1);

    area.regenerate();

    assert_eq!(area.pending_injections(), 0);
    assert_eq!(area.tick(), 0);
    let counts = area.counts();
    assert_eq!(counts.medicine, 0);
    assert!(counts.cancer >= 100 && counts.cancer < 200);
    assert_eq!(counts.total(), 400);
}

#[test]
fn perf_metrics_only_when_enabled() {
    let mut area = area(10, 10, FanOut::Fixed(2));
    area.on_tick(TICK_SECONDS).expect("tick");
    assert_eq!(area.perf_stats().ticks_run(), 0);
    assert_eq!(area.perf_stats().grid_size(), 0);

    area.enable_perf_metrics(true);
    area.inject_medicine([12.0, 12.0]);
    area.on_tick(TICK_SECONDS).expect("tick");
    let perf = area.perf_stats();
    assert_eq!(perf.ticks_run(), 1);
    assert_eq!(perf.grid_size(), 100);
    assert_eq!(perf.injections_drained(), 1);
    assert!(perf.cells_injected() <= 2);
    assert_eq!(perf.kernel_launches(), 2 * PARTITION_COUNT as u32);
}

#[test]
fn invalid_config_is_rejected_before_start() {
    let config = SimConfig {
        fan_out: FanOut::Fixed(0),
        ..SimConfig::default()
    };
    assert!(matches!(
        CellArea::with_geometry(8, 8, config),
        Err(SimError::InvalidConfig(_))
    ));
}
