use super::perf_stats::PerfStats;
use super::CellArea;

pub(super) fn enable_perf_metrics(area: &mut CellArea, enabled: bool) {
    area.perf_enabled = enabled;
    if !enabled {
        area.perf_stats.reset();
    }
}

pub(super) fn get_perf_stats(area: &CellArea) -> PerfStats {
    area.perf_stats.clone()
}
