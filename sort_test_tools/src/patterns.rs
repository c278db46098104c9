//! Input patterns for testing and benchmarking the sorting entry
//! points, over `i32` values.
//!
//! Every generator is deterministic per process: all randomness derives
//! from one root seed that is printed by the test battery and can be
//! pinned with the `OVERRIDE_SEED` environment variable.

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;

use rand::distributions::{Distribution, Uniform};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use zipf::ZipfDistribution;

/// The process-wide root seed.
pub fn random_init_seed() -> u64 {
    static SEED: OnceLock<u64> = OnceLock::new();

    *SEED.get_or_init(|| {
        env::var("OVERRIDE_SEED")
            .ok()
            .map(|seed| u64::from_str(&seed).unwrap())
            .unwrap_or_else(epoch_seed)
    })
}

fn epoch_seed() -> u64 {
    // Seconds since the epoch divided by ten, so the seed of a failing
    // CI run can be reconstructed from the log timestamps.
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs()
        / 10
}

fn rng_for(salt: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(random_init_seed() ^ salt)
}

// --- Random families ---

pub fn random(len: usize) -> Vec<i32> {
    //     .
    // : . : :
    // :.:::.::

    let mut rng = rng_for(0x7270);
    (0..len).map(|_| rng.gen::<i32>()).collect()
}

pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<Uniform<i32>>,
{
    // :.:.:.::

    let mut rng = rng_for(0x756e);
    let dist: Uniform<i32> = range.into();
    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    // Highly skewed towards a few hot values.

    if len == 0 {
        return Vec::new();
    }
    let mut rng = rng_for(0x7a69);
    let dist = ZipfDistribution::new(len, exponent).unwrap();
    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    //     .:
    //   .:::. :
    // .::::::.::
    // [----][--]
    // sorted head, unsorted tail

    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;
    v[..sorted_len].sort_unstable();
    v
}

// --- Shaped families ---

pub fn all_equal(len: usize) -> Vec<i32> {
    // ......
    // ::::::

    vec![66; len]
}

pub fn ascending(len: usize) -> Vec<i32> {
    //     .:
    //   .:::
    // .:::::

    (0..len as i32).collect()
}

pub fn descending(len: usize) -> Vec<i32> {
    // :.
    // :::.
    // :::::.

    (0..len as i32).rev().collect()
}

pub fn saw_ascending(len: usize, saw_count: usize) -> Vec<i32> {
    //   .:  .:
    // .:::.:::

    let mut v = random(len);
    if len == 0 {
        return v;
    }
    let chunk_size = (len / saw_count.max(1)).max(1);
    for chunk in v.chunks_mut(chunk_size) {
        chunk.sort_unstable();
    }
    v
}

pub fn saw_descending(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.
    // :::.:::.

    let mut v = random(len);
    if len == 0 {
        return v;
    }
    let chunk_size = (len / saw_count.max(1)).max(1);
    for chunk in v.chunks_mut(chunk_size) {
        chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
    }
    v
}

pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    let mut v = random(len);
    if len == 0 {
        return v;
    }
    let mut rng = rng_for(0x7377);
    let chunk_size = (len / saw_count.max(1)).max(1);
    for chunk in v.chunks_mut(chunk_size) {
        if rng.gen::<bool>() {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
        }
    }
    v
}

pub fn pipe_organ(len: usize) -> Vec<i32> {
    //   .:.
    // .:::::.

    let mut v = random(len);
    let mid = len / 2;
    v[..mid].sort_unstable();
    v[mid..].sort_unstable_by_key(|&e| std::cmp::Reverse(e));
    v
}

// --- Bentley-McIlroy matrix ---

/// The five Bentley-McIlroy input distributions, parameterized by `m`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dist {
    Sawtooth,
    Rand,
    Stagger,
    Plateau,
    Shuffle,
}

impl Dist {
    pub const ALL: [Dist; 5] = [
        Dist::Sawtooth,
        Dist::Rand,
        Dist::Stagger,
        Dist::Plateau,
        Dist::Shuffle,
    ];
}

/// The six Bentley-McIlroy mutations applied on top of a distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Copy,
    Reverse,
    ReverseFirstHalf,
    ReverseSecondHalf,
    Sorted,
    Dither,
}

impl Mode {
    pub const ALL: [Mode; 6] = [
        Mode::Copy,
        Mode::Reverse,
        Mode::ReverseFirstHalf,
        Mode::ReverseSecondHalf,
        Mode::Sorted,
        Mode::Dither,
    ];
}

pub fn dist_pattern(dist: Dist, n: usize, m: i32) -> Vec<i32> {
    let mut rng = rng_for(0x626d ^ ((n as u64) << 16) ^ m as u64);
    let mut j = 0;
    let mut k = 1;

    (0..n as i32)
        .map(|i| match dist {
            Dist::Sawtooth => i % m,
            Dist::Rand => rng.gen_range(0..m),
            Dist::Stagger => (i * m + i) % n as i32,
            Dist::Plateau => i.min(m),
            Dist::Shuffle => {
                if rng.gen_range(0..m) != 0 {
                    j += 2;
                    j
                } else {
                    k += 2;
                    k
                }
            }
        })
        .collect()
}

pub fn apply_mode(mode: Mode, data: &[i32]) -> Vec<i32> {
    let n = data.len();
    match mode {
        Mode::Copy => data.to_vec(),
        Mode::Reverse => data.iter().rev().copied().collect(),
        Mode::ReverseFirstHalf => {
            let mut v = data.to_vec();
            v[..n / 2].reverse();
            v
        }
        Mode::ReverseSecondHalf => {
            let mut v = data.to_vec();
            v[n / 2..].reverse();
            v
        }
        Mode::Sorted => {
            // The battery under test is not trusted here.
            let mut v = data.to_vec();
            v.sort_unstable();
            v
        }
        Mode::Dither => data
            .iter()
            .enumerate()
            .map(|(i, &x)| x + (i % 5) as i32)
            .collect(),
    }
}
