use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic delivery dataset in the layout the dashboard expects.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Output CSV path
    #[arg(long, default_value = "delivery_data.csv")]
    output: PathBuf,

    /// Number of delivery records
    #[arg(long, default_value_t = 500)]
    rows: usize,

    /// PRNG seed; the same seed always writes the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

// (label, minutes added to the base delivery time)
const CITIES: [(&str, f64); 3] = [("Urban", 0.0), ("Metropolitian", 4.0), ("Semi-Urban", 9.0)];
const VEHICLES: [(&str, f64); 4] = [
    ("motorcycle", 0.0),
    ("scooter", 1.5),
    ("electric_scooter", 2.5),
    ("bicycle", 6.0),
];
const TRAFFIC: [(&str, f64); 4] = [("Low", 0.0), ("Medium", 4.0), ("High", 6.0), ("Jam", 12.0)];
const WEATHER: [(&str, f64); 6] = [
    ("conditions Sunny", 0.0),
    ("conditions Cloudy", 3.0),
    ("conditions Windy", 2.0),
    ("conditions Fog", 6.0),
    ("conditions Sandstorms", 5.0),
    ("conditions Stormy", 5.5),
];

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "ID",
        "Delivery_person_Age",
        "Order_Date",
        "Weatherconditions",
        "Road_traffic_density",
        "Type_of_vehicle",
        "City",
        "Time_taken(min)",
    ])?;

    for i in 0..args.rows {
        let (city, city_cost) = *rng.pick(&CITIES);
        let (vehicle, vehicle_cost) = *rng.pick(&VEHICLES);
        let (traffic, traffic_cost) = *rng.pick(&TRAFFIC);
        let (weather, weather_cost) = *rng.pick(&WEATHER);

        let day = 1 + rng.next_u64() % 28;
        let month = 2 + rng.next_u64() % 3;
        let age = 20 + rng.next_u64() % 20;

        let minutes = rng
            .gauss(14.0 + city_cost + vehicle_cost + traffic_cost + weather_cost, 4.0)
            .clamp(10.0, 60.0)
            .round() as u32;
        // A few records carry no usable time, as in the real exports.
        let time_taken = if rng.next_f64() < 0.02 {
            "NaN ".to_string()
        } else {
            format!("(min) {minutes}")
        };

        writer.write_record([
            format!("0x{:04x}", 0x4000 + i),
            age.to_string(),
            format!("{day:02}-{month:02}-2022"),
            weather.to_string(),
            traffic.to_string(),
            vehicle.to_string(),
            city.to_string(),
            time_taken,
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} delivery records to {}", args.rows, args.output.display());
    Ok(())
}
