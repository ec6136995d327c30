use anyhow::Context;
use clap::Parser;
use menu_pricing::app::repl::{self, ReplCommand};
use menu_pricing::utils::error::ErrorSeverity;
use menu_pricing::utils::{logger, validation::Validate};
use menu_pricing::{
    CliConfig, Command, DispatchOutcome, Intent, ItemId, LocalStorage, MenuConfig, MenuEngine,
    MenuError, MenuView, SizeId,
};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);

    // 載入菜單
    let mut menu = match MenuConfig::from_file(&cli.config) {
        Ok(menu) => menu,
        Err(e) => {
            eprintln!("❌ Failed to load menu file '{}': {}", cli.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    cli.apply_overrides(&mut menu);

    if let Err(e) = menu.validate() {
        tracing::error!("❌ Menu validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let catalog = Arc::new(menu.to_catalog()?);
    let storage = LocalStorage::new(&menu.storage.path);
    tracing::info!("📁 Storage directory: {}", storage.base_path().display());
    let mut engine = MenuEngine::open(catalog, storage, menu.storage.key.clone());

    let result = match cli.command.clone() {
        Command::Show { expand } => {
            if let Some(item) = expand {
                run_intent(&mut engine, Intent::ToggleExpanded(ItemId(item)))
            } else {
                Ok(())
            }
        }
        Command::Toggle { item, size } => {
            expand_for_edit(&mut engine, item);
            run_intent(
                &mut engine,
                Intent::ToggleSizeActive(ItemId(item), SizeId(size)),
            )
        }
        Command::SetPrice { item, size, value } => {
            expand_for_edit(&mut engine, item);
            run_intent(
                &mut engine,
                Intent::SetPrice(ItemId(item), SizeId(size), value),
            )
        }
        Command::Reset => {
            report(&engine.reset());
            Ok(())
        }
        Command::Repl => {
            run_repl(&mut engine, menu.title())?;
            return Ok(());
        }
    };

    print!("{}", MenuView::build(menu.title(), engine.state()));

    if let Err(e) = result {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 2,
            ErrorSeverity::Medium => 0,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn expand_for_edit(engine: &mut MenuEngine<LocalStorage>, item: u32) {
    if engine.state().expanded_item() != Some(ItemId(item)) {
        // unknown ids are reported by the intent that follows
        let _ = engine.dispatch(Intent::ToggleExpanded(ItemId(item)));
    }
}

fn run_intent(engine: &mut MenuEngine<LocalStorage>, intent: Intent) -> Result<(), MenuError> {
    let outcome = engine.dispatch(intent)?;
    report(&outcome);
    Ok(())
}

fn report(outcome: &DispatchOutcome) {
    if outcome.has_warning() {
        eprintln!("⚠️  Change applied but not saved; it will be lost on restart");
    }
}

fn run_repl(engine: &mut MenuEngine<LocalStorage>, title: &str) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", MenuView::build(title, engine.state()));
    println!("Type 'help' for commands.");

    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .context("Failed to read command")?;
        if read == 0 {
            break;
        }

        match repl::parse_line(&line) {
            Ok(ReplCommand::Nothing) => {}
            Ok(ReplCommand::Quit) => break,
            Ok(ReplCommand::Help) => println!("{}", repl::HELP),
            Ok(ReplCommand::Show) => print!("{}", MenuView::build(title, engine.state())),
            Ok(ReplCommand::Reset) => {
                report(&engine.reset());
                print!("{}", MenuView::build(title, engine.state()));
            }
            Ok(ReplCommand::Dispatch(intent)) => match engine.dispatch(intent) {
                Ok(outcome) => {
                    report(&outcome);
                    print!("{}", MenuView::build(title, engine.state()));
                }
                Err(e) => {
                    println!("❌ {}", e.user_friendly_message());
                    println!("💡 {}", e.recovery_suggestion());
                }
            },
            Err(message) => println!("❌ {}", message),
        }
    }

    Ok(())
}
