//! Write a large synthetic pincode CSV for loader and query experiments.
//!
//! Usage: `generate_sample [OUT] [ROWS]` (defaults: `sample_pincodes.csv`, 150000).

use std::path::PathBuf;

use anyhow::{Context, Result};

const HEADER: [&str; 10] = [
    "officename",
    "pincode",
    "officetype",
    "Deliverystatus",
    "divisionname",
    "regionname",
    "circlename",
    "taluk",
    "districtname",
    "statename",
];

/// (state, pincode prefix, districts)
const STATES: &[(&str, u32, &[&str])] = &[
    ("DELHI", 110, &["Central Delhi", "New Delhi", "South Delhi", "North West Delhi"]),
    ("MAHARASHTRA", 400, &["Mumbai", "Pune", "Thane", "Nagpur", "Aurangabad"]),
    ("KARNATAKA", 560, &["Bangalore", "Mysore", "Mangalore", "Belgaum"]),
    ("TAMIL NADU", 600, &["Chennai", "Coimbatore", "Madurai", "Salem"]),
    ("WEST BENGAL", 700, &["Kolkata", "Howrah", "Darjeeling"]),
    ("BIHAR", 800, &["Patna", "Gaya", "Aurangabad", "Muzaffarpur"]),
    ("KERALA", 680, &["Thrissur", "Ernakulam", "Kozhikode"]),
    ("ASSAM", 781, &["Kamrup", "Dibrugarh", "Jorhat"]),
];

const LOCALITIES: &[&str] = &[
    "Gandhi Nagar", "Nehru Road", "Station Road", "Civil Lines", "Market Yard", "Rampur",
    "Shivaji Nagar", "Model Town", "Sadar Bazar", "Kothi", "Industrial Estate", "Cantonment",
];

/// (office type, suffix, relative weight)
const OFFICE_TYPES: &[(&str, &str, u64)] = &[("H.O", "H.O", 1), ("S.O", "S.O", 6), ("B.O", "B.O", 18)];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform index in `0..n`.
    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }

    fn weighted<'a>(&mut self, items: &'a [(&'a str, &'a str, u64)]) -> &'a (&'a str, &'a str, u64) {
        let total: u64 = items.iter().map(|(_, _, w)| w).sum();
        let mut roll = self.next_u64() % total;
        for item in items {
            if roll < item.2 {
                return item;
            }
            roll -= item.2;
        }
        &items[items.len() - 1]
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let output_path = PathBuf::from(args.next().unwrap_or_else(|| "sample_pincodes.csv".into()));
    let rows: usize = match args.next() {
        Some(n) => n.parse().with_context(|| format!("row count '{n}' is not a number"))?,
        None => 150_000,
    };

    let mut rng = SimpleRng::new(42);
    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record(HEADER).context("writing header")?;

    for _ in 0..rows {
        let (state, prefix, districts) = *rng.pick(STATES);
        let district = *rng.pick(districts);
        let locality = *rng.pick(LOCALITIES);
        let (office_type, suffix, _) = *rng.weighted(OFFICE_TYPES);

        let pincode = format!("{prefix}{:03}", rng.below(1000));
        let office = format!("{locality} {suffix}");
        let delivery = if office_type == "B.O" || rng.below(5) > 0 {
            "Delivery"
        } else {
            "Non-Delivery"
        };
        let division = format!("{district} Division");
        let region = format!("{district} Region");
        let circle = format!("{} Circle", title_case(state));

        writer
            .write_record([
                office.as_str(),
                pincode.as_str(),
                office_type,
                delivery,
                division.as_str(),
                region.as_str(),
                circle.as_str(),
                district,
                district,
                state,
            ])
            .context("writing row")?;
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {rows} post office rows to {}", output_path.display());
    Ok(())
}

fn title_case(s: &str) -> String {
    s.split(' ')
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
