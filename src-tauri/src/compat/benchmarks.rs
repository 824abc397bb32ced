//! Static CPU/GPU benchmark score tables and lookup fallbacks.
//!
//! Scores are coarse relative-performance numbers (higher is better), used
//! only to compare user hardware against per-game requirement scores.

/// Known CPU benchmark scores.
const CPU_BENCHMARKS: &[(&str, u32)] = &[
    // Intel
    ("Intel Core i9-13900K", 45_000),
    ("Intel Core i7-13700K", 38_000),
    ("Intel Core i5-13600K", 32_000),
    ("Intel Core i9-12900K", 40_000),
    ("Intel Core i7-12700K", 35_000),
    ("Intel Core i5-12600K", 28_000),
    ("Intel Core i7-11700K", 25_000),
    ("Intel Core i5-11600K", 20_000),
    ("Intel Core i7-10700K", 22_000),
    ("Intel Core i5-10400", 15_000),
    ("Intel Core i3-10100", 10_000),
    // AMD
    ("AMD Ryzen 9 7950X", 48_000),
    ("AMD Ryzen 9 7900X", 42_000),
    ("AMD Ryzen 7 7700X", 35_000),
    ("AMD Ryzen 5 7600X", 28_000),
    ("AMD Ryzen 9 5950X", 38_000),
    ("AMD Ryzen 9 5900X", 35_000),
    ("AMD Ryzen 7 5800X", 28_000),
    ("AMD Ryzen 5 5600X", 22_000),
    ("AMD Ryzen 7 3700X", 20_000),
    ("AMD Ryzen 5 3600", 16_000),
    ("AMD Ryzen 3 3300X", 12_000),
];

/// Known GPU benchmark scores (approximate 3DMark-class numbers).
const GPU_BENCHMARKS: &[(&str, u32)] = &[
    // NVIDIA RTX 40 series
    ("NVIDIA GeForce RTX 4090", 35_000),
    ("NVIDIA GeForce RTX 4080", 28_000),
    ("NVIDIA GeForce RTX 4070 Ti", 24_000),
    ("NVIDIA GeForce RTX 4070", 20_000),
    ("NVIDIA GeForce RTX 4060 Ti", 16_000),
    ("NVIDIA GeForce RTX 4060", 14_000),
    // NVIDIA RTX 30 series
    ("NVIDIA GeForce RTX 3090", 25_000),
    ("NVIDIA GeForce RTX 3080", 22_000),
    ("NVIDIA GeForce RTX 3070", 18_000),
    ("NVIDIA GeForce RTX 3060 Ti", 15_000),
    ("NVIDIA GeForce RTX 3060", 13_000),
    ("NVIDIA GeForce RTX 3050", 10_000),
    // NVIDIA GTX 16 series
    ("NVIDIA GeForce GTX 1660 Ti", 9_000),
    ("NVIDIA GeForce GTX 1660", 8_000),
    ("NVIDIA GeForce GTX 1650", 6_000),
    // AMD RX 7000 series
    ("AMD Radeon RX 7900 XTX", 30_000),
    ("AMD Radeon RX 7900 XT", 26_000),
    ("AMD Radeon RX 7800 XT", 22_000),
    ("AMD Radeon RX 7700 XT", 18_000),
    ("AMD Radeon RX 7600", 14_000),
    // AMD RX 6000 series
    ("AMD Radeon RX 6900 XT", 23_000),
    ("AMD Radeon RX 6800 XT", 20_000),
    ("AMD Radeon RX 6700 XT", 16_000),
    ("AMD Radeon RX 6600 XT", 12_000),
    ("AMD Radeon RX 6600", 10_000),
    ("AMD Radeon RX 6500 XT", 7_000),
];

const DEFAULT_CPU_SCORE: u32 = 10_000;
const DEFAULT_GPU_SCORE: u32 = 8_000;

fn table_lookup(table: &[(&str, u32)], name: &str) -> Option<u32> {
    let wanted = name.trim();
    table
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(wanted))
        .map(|(_, score)| *score)
}

/// Resolve a benchmark score for a CPU.
///
/// Falls back to a `cores * clock_ghz * 1000` estimate when the CPU is not
/// in the table and both values are known, then to a fixed default.
pub fn cpu_score(name: &str, cores: Option<u32>, clock_ghz: Option<f32>) -> u32 {
    if let Some(score) = table_lookup(CPU_BENCHMARKS, name) {
        return score;
    }
    if let (Some(cores), Some(clock)) = (cores, clock_ghz) {
        return (cores as f32 * clock * 1000.0) as u32;
    }
    DEFAULT_CPU_SCORE
}

/// Resolve a benchmark score for a GPU.
///
/// Falls back to a VRAM-tiered estimate when the GPU is not in the table,
/// then to a fixed default.
pub fn gpu_score(name: &str, vram_gb: Option<u32>) -> u32 {
    if let Some(score) = table_lookup(GPU_BENCHMARKS, name) {
        return score;
    }
    if let Some(vram) = vram_gb {
        return match vram {
            16.. => 20_000,
            12..=15 => 15_000,
            8..=11 => 12_000,
            6..=7 => 9_000,
            4..=5 => 6_000,
            _ => 3_000,
        };
    }
    DEFAULT_GPU_SCORE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_cpu_lookup() {
        assert_eq!(cpu_score("AMD Ryzen 5 5600X", None, None), 22_000);
        assert_eq!(cpu_score("Intel Core i9-13900K", None, None), 45_000);
    }

    #[test]
    fn test_cpu_lookup_is_case_insensitive() {
        assert_eq!(cpu_score("amd ryzen 5 5600x", None, None), 22_000);
        assert_eq!(cpu_score("  AMD Ryzen 5 5600X  ", None, None), 22_000);
    }

    #[test]
    fn test_unknown_cpu_estimated_from_cores_and_clock() {
        // 8 cores at 4.0 GHz -> 32000
        assert_eq!(cpu_score("Mystery CPU", Some(8), Some(4.0)), 32_000);
    }

    #[test]
    fn test_unknown_cpu_default() {
        assert_eq!(cpu_score("Mystery CPU", None, None), 10_000);
        // Estimate needs both cores and clock
        assert_eq!(cpu_score("Mystery CPU", Some(8), None), 10_000);
    }

    #[test]
    fn test_known_gpu_lookup() {
        assert_eq!(gpu_score("NVIDIA GeForce RTX 3060", None), 13_000);
        assert_eq!(gpu_score("AMD Radeon RX 7900 XTX", None), 30_000);
    }

    #[test]
    fn test_unknown_gpu_vram_tiers() {
        assert_eq!(gpu_score("Mystery GPU", Some(24)), 20_000);
        assert_eq!(gpu_score("Mystery GPU", Some(12)), 15_000);
        assert_eq!(gpu_score("Mystery GPU", Some(8)), 12_000);
        assert_eq!(gpu_score("Mystery GPU", Some(6)), 9_000);
        assert_eq!(gpu_score("Mystery GPU", Some(4)), 6_000);
        assert_eq!(gpu_score("Mystery GPU", Some(2)), 3_000);
    }

    #[test]
    fn test_unknown_gpu_default() {
        assert_eq!(gpu_score("Mystery GPU", None), 8_000);
    }

    #[test]
    fn test_known_name_beats_estimate() {
        // Table entry wins even when estimate inputs are provided
        assert_eq!(
            cpu_score("AMD Ryzen 5 5600X", Some(6), Some(3.7)),
            22_000
        );
        assert_eq!(gpu_score("NVIDIA GeForce RTX 3060", Some(12)), 13_000);
    }
}
