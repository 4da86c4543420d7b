//! Coverage demo
//!
//! Usage: coverage-demo <dataset-root> [classes.json]
//!
//! Shows:
//! 1. Which dataset folders were found
//! 2. Which catalog classes they cover
//! 3. What the heuristic predictor says for a few filenames

use std::path::PathBuf;
use std::sync::Arc;

use catalog::Catalog;
use datasets::{coverage, list_datasets, map_classes_to_datasets, ReconcilerRules};
use heuristics::HeuristicPredictor;

fn main() {
    let mut args = std::env::args().skip(1);
    let root = PathBuf::from(args.next().unwrap_or_else(|| "Dataset tanaman".to_string()));
    let catalog = match args.next() {
        Some(path) => {
            let loaded = Catalog::load_or_empty(&PathBuf::from(path));
            if let Some(issue) = &loaded.issue {
                println!("⚠️  catalog not loaded: {issue}");
            }
            loaded.into_value()
        }
        None => Catalog::builtin(),
    };

    println!("📂 Step 1: Scan {}", root.display());
    println!("   ─────────────────────────────────");
    let scan = list_datasets(&root, &ReconcilerRules::default());
    if let Some(issue) = &scan.issue {
        println!("   ⚠️  {issue}");
    }
    let found = scan.into_value();
    for d in &found {
        println!("   {:<45} {:>6} images", d.display_name, d.image_count);
    }
    println!("   ✓ {} dataset folders\n", found.len());

    println!("🔗 Step 2: Match catalog classes");
    println!("   ─────────────────────────────────");
    let mapping = map_classes_to_datasets(&catalog, &found);
    for entry in catalog.iter() {
        match mapping.get(&entry.id) {
            Some(m) => println!("   [{:>2}] {:<32} ← {} ({} images)", entry.id, entry.label, m.display_name, m.image_count),
            None => println!("   [{:>2}] {:<32} ✗ no folder", entry.id, entry.label),
        }
    }
    let report = coverage(&catalog, &mapping);
    println!(
        "   ✓ {}/{} classes covered, {} images\n",
        report.matched_classes, report.total_classes, report.total_images
    );

    println!("🧪 Step 3: Heuristic predictions");
    println!("   ─────────────────────────────────");
    let predictor = HeuristicPredictor::new(Arc::new(catalog));
    let mut rng = rand::thread_rng();
    for name in ["corn_leaf.jpg", "potato_spots.png", "tomato.webp", "IMG_0001.jpg"] {
        match predictor.predict_name(name, &mut rng) {
            Ok(p) => println!("   {:<18} → {} ({:.1}%)", name, p.full_class, p.confidence * 100.0),
            Err(e) => println!("   {:<18} → error: {e}", name),
        }
    }
}
