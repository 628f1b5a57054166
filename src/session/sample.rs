use crate::foundation::core::{Category, Point4D};
use crate::foundation::math::Mulberry32;
use crate::store::node::PropertyOverrides;

/// Seed of the built-in sample scene.
pub const SAMPLE_SEED: u32 = 123_456_789;

const HUMAN: [Point4D; 4] = [
    Point4D::new(-3.0, 2.0, 1.0, -1.5),
    Point4D::new(-2.0, 1.5, 0.5, 0.0),
    Point4D::new(-1.5, 2.5, -0.5, 1.2),
    Point4D::new(-2.8, 0.8, 1.2, -0.8),
];

const AI: [Point4D; 5] = [
    Point4D::new(3.0, 1.0, 0.0, 0.0),
    Point4D::new(2.5, 2.0, 1.0, 0.8),
    Point4D::new(3.5, 0.5, -1.0, 0.8),
    Point4D::new(2.8, 1.8, 0.3, -0.5),
    Point4D::new(3.2, 0.2, 0.7, 1.5),
];

const HYBRID: [Point4D; 3] = [
    Point4D::new(0.0, 3.0, 0.0, 0.5),
    Point4D::new(-0.5, -1.0, 2.0, -1.0),
    Point4D::new(0.8, 0.0, -1.5, 2.0),
];

const KERNEL: [Point4D; 3] = [
    Point4D::new(0.0, 0.0, 0.0, 0.0),
    Point4D::new(0.3, 0.3, 0.3, 1.8),
    Point4D::new(-0.2, -0.1, 0.4, -2.2),
];

fn base_intensity(category: Category) -> f64 {
    match category {
        Category::Human => 0.8,
        Category::Ai => 1.2,
        Category::Hybrid => 1.0,
        Category::Kernel => 1.8,
    }
}

fn base_coupling(category: Category) -> f64 {
    match category {
        Category::Kernel => 3.0,
        Category::Ai => 1.5,
        Category::Human | Category::Hybrid => 0.8,
    }
}

/// The fixed 15-node sample scene, in insertion order.
///
/// Positions are fixed; intensity, coherence and kernel coupling are jittered from
/// [`SAMPLE_SEED`], so the result is identical on every call.
pub fn sample_nodes() -> Vec<(Point4D, Category, PropertyOverrides)> {
    let groups: [(Category, &[Point4D]); 4] = [
        (Category::Human, &HUMAN),
        (Category::Ai, &AI),
        (Category::Hybrid, &HYBRID),
        (Category::Kernel, &KERNEL),
    ];

    let mut rng = Mulberry32::new(SAMPLE_SEED);
    let mut out = Vec::with_capacity(15);
    for (category, positions) in groups {
        for &position in positions {
            let intensity = base_intensity(category) + rng.next_f64() * 0.4;
            let coherence = 0.6 + rng.next_f64() * 0.3;
            let kernel_coupling = base_coupling(category) + rng.next_f64() * 0.5;
            let overrides = PropertyOverrides {
                intensity: Some(intensity),
                coherence: Some(coherence),
                kernel_coupling: Some(kernel_coupling),
                ..PropertyOverrides::default()
            };
            out.push((position, category, overrides));
        }
    }
    out
}
