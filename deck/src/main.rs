//! Deck - prints the French deck and the Position records.
//!
//! Usage: `deck [-v|--verbose] [shapes.json]`. A shape file is loaded into a
//! registry and the fields of each declared shape are listed.

use std::env;
use std::path::Path;

use log::LevelFilter;
use rekord_core::values;
use rekord_registry::RegistryConfig;

fn main() {
    let args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");

    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let card = rekord_deck::card_shape()?;
    let deck = rekord_deck::make_french_deck(&card)?;
    println!("{}", rekord_deck::render_all(&deck));

    let positions = rekord_deck::position_registry()?;
    if let Some(first) = positions.shadowed("Position").next() {
        let greenwich = first.instantiate(vec!["Greenwich".into()], values! { "lat" => 51.8 })?;
        println!("\n{}", greenwich);
    }
    for attempt in [
        positions.instantiate("Position", vec!["Null Island".into()], values!()),
        positions.instantiate("Position", vec!["Greenwich".into()], values! { "lat" => 51.8 }),
    ] {
        if let Err(e) = attempt {
            println!("Error: {}", e);
        }
    }
    let vancouver = positions.instantiate(
        "Position",
        vec!["Vancouver".into(), (-123.1).into(), 49.3.into()],
        values!(),
    )?;
    println!("{}", vancouver);

    for path in args.iter().filter(|a| !a.starts_with('-')) {
        let registry = RegistryConfig::from_path(Path::new(path))?.to_builder()?.build();
        println!("\n{}:", path);
        let mut shapes: Vec<_> = registry.all_shapes().collect();
        shapes.sort_by(|a, b| a.name().cmp(b.name()));
        for shape in shapes {
            let fields: Vec<String> = shape
                .fields()
                .iter()
                .map(|f| match (&f.type_hint, &f.default) {
                    (Some(hint), Some(default)) => format!("{}: {} = {}", f.name, hint, default),
                    (Some(hint), None) => format!("{}: {}", f.name, hint),
                    (None, Some(default)) => format!("{} = {}", f.name, default),
                    (None, None) => f.name.clone(),
                })
                .collect();
            println!("  {}({})", shape.name(), fields.join(", "));
        }
    }

    Ok(())
}
