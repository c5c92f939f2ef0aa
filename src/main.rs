// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::Result;
use std::env;
use std::path::PathBuf;

// Use library instead of local modules
use svadhyaya::{export_scripture, ContentLibrary, Preferences, Translations};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("list") => run_list()?,
        Some("export") => run_export(&args[2..])?,
        _ => run_ui_mode()?,
    }

    Ok(())
}

fn run_list() -> Result<()> {
    println!("📖 Svadhyaya - Content Library");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let library = ContentLibrary::load()?;

    println!("\nScriptures:");
    for scripture in library.scriptures() {
        let status = if scripture.is_available() {
            format!("{} verses", scripture.verse_count())
        } else {
            "coming soon".to_string()
        };
        println!(
            "  {:<24} {:<10} {}",
            scripture.id,
            scripture.category.as_str(),
            status
        );
    }

    println!("\nDharma cards:");
    for card in library.dharma_cards() {
        println!("  {:<24} {}", card.id, card.category.as_str());
    }

    println!(
        "\n✓ {} scriptures, {} dharma cards",
        library.scripture_count(),
        library.dharma_count()
    );

    Ok(())
}

fn run_export(args: &[String]) -> Result<()> {
    println!("📄 Svadhyaya - PDF Export");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let Some(id) = args.first() else {
        eprintln!("❌ Usage: svadhyaya export <scripture-id> [output.pdf]");
        eprintln!("   Run: svadhyaya list");
        eprintln!("   to see the available ids.");
        std::process::exit(1);
    };

    let library = ContentLibrary::load()?;

    // Content-not-found fallback: message plus the way back
    let Some(scripture) = library.scripture(id) else {
        eprintln!("❌ No scripture with id '{}'", id);
        eprintln!("   Available ids:");
        for s in library.scriptures() {
            eprintln!("     {}", s.id);
        }
        std::process::exit(1);
    };

    let out_path = args
        .get(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", scripture.id)));

    println!("\n📂 Exporting '{}'...", scripture.title_translit);
    export_scripture(scripture, &out_path)?;

    println!(
        "✓ Wrote {} ({} verses + title page)",
        out_path.display(),
        scripture.verse_count()
    );

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    println!("🖥️  Loading Svadhyaya...\n");

    let library = ContentLibrary::load()?;
    let translations = Translations::load()?;
    let prefs = Preferences::load();

    println!(
        "📊 Loaded {} scriptures, {} dharma cards",
        library.scripture_count(),
        library.dharma_count()
    );
    println!("Starting UI... (Press 'q' to quit)\n");

    let mut app = ui::App::new(library, translations, prefs);
    ui::run_ui(&mut app)?;

    // The selected chant phrase and language are the only persisted state
    if let Err(err) = app.prefs.save() {
        eprintln!("⚠️  Could not save preferences: {}", err);
    }

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use web UI: cargo run --bin svadhyaya-server --features server");
    std::process::exit(1);
}
