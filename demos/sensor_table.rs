//! Calibration table for a set of sensors, built once at startup and read on every sample.

use vector_map::{Natural, Reversed, VectorMap};

#[derive(Debug, Clone, Copy)]
struct Calibration {
    offset: f32,
    scale: f32,
}

impl Calibration {
    fn apply(&self, raw: f32) -> f32 {
        (raw + self.offset) * self.scale
    }
}

fn main() {
    // sensor ids arrive sorted from the config blob, so hinted appends never search
    let mut table = VectorMap::<u16, Calibration>::with_capacity(64);
    let mut hint = table.end();
    for id in (100..164).step_by(2) {
        let calibration = Calibration {
            offset: -(id as f32) / 100.0,
            scale: 1.0 + (id % 7) as f32 / 10.0,
        };
        hint = table.insert_hint(hint, id, calibration).next();
    }
    println!("{} sensors, capacity {}", table.len(), table.capacity());

    // a late registration lands in the middle
    let (cursor, inserted) = table.insert(
        111,
        Calibration {
            offset: 0.0,
            scale: 1.0,
        },
    );
    println!("sensor 111 inserted={inserted} at slot {}", cursor.offset());

    for (id, raw) in [(104, 20.0), (111, 3.5), (999, 1.0)] {
        match table.try_at(&id) {
            Ok(calibration) => println!("sensor {id}: {:.2}", calibration.apply(raw)),
            Err(e) => println!("sensor {id}: {e}"),
        }
    }

    // decommission a block of sensors
    let (first, last) = (table.lower_bound(&140), table.lower_bound(&150));
    let removed = table.iter_between(first, last).count();
    table.erase_range(first, last);
    println!("removed {removed}, {} left", table.len());

    let banks = table.range(100..120).map(|(id, _)| *id).collect::<Vec<_>>();
    println!("bank 1: {banks:?}");

    // newest first for the status page
    let by_recent: VectorMap<u16, &str, _> =
        VectorMap::from_iter_with([(3, "c"), (1, "a"), (2, "b")], Reversed(Natural));
    println!("{by_recent:?}");
}
