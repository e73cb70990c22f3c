mod commands;

use anyhow::Context;
use commands::{parse_command, state_label, Command, HELP};
use partydeck_core::{ApplicationState, Language};
use partydeck_data::{load_catalog, FileCatalog};
use partydeck_session::{JsonFileStore, Session, SessionConfig};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct CliOptions {
    config: SessionConfig,
    no_save: bool,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut config = SessionConfig::default();
    if let Some(path) = std::env::var_os("PARTYDECK_CATALOG") {
        config.catalog_path = PathBuf::from(path);
    }
    if let Ok(code) = std::env::var("PARTYDECK_LANG") {
        config.language = Language::detect(Some(&code));
    }
    let mut no_save = false;
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--no-save" => no_save = true,
            "--catalog" => {
                if let Some(value) = args.get(idx + 1) {
                    config.catalog_path = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--save" => {
                if let Some(value) = args.get(idx + 1) {
                    config.save_path = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    config.language = Language::detect(Some(value));
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    CliOptions { config, no_save }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn build_session(options: &CliOptions) -> anyhow::Result<Session> {
    let catalog_path = &options.config.catalog_path;
    // Fail early on a missing catalog; later fetch errors only degrade the pool.
    let catalog = load_catalog(catalog_path)
        .with_context(|| format!("load catalog {}", catalog_path.display()))?;
    info!(cards = catalog.cards.len(), "catalog {}", catalog_path.display());

    let session = Session::new(FileCatalog::new(catalog_path), options.config.language);
    let session = match (&options.config.save_path, options.no_save) {
        (Some(path), false) => {
            debug!("saving to {}", path.display());
            session.with_state_store(JsonFileStore::new(path)).restore()
        }
        _ => session,
    };
    Ok(session)
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let mut session = build_session(&options)?;
    session.on_language_change(|language| info!("card language is now {language}"));

    println!("partydeck - type `help` for commands");
    print_status(&session);

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("read stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => run_command(&mut session, command)?,
            Err(err) => println!("{err}"),
        }
    }
    Ok(())
}

fn run_command(session: &mut Session, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Help => println!("{HELP}"),
        Command::Players => print_players(session),
        Command::Add(name) => {
            let id = session.add_player(&name);
            println!("added {name} (#{id})");
        }
        Command::Remove(id) => {
            if session.remove_player(id) {
                println!("removed #{id}");
            } else {
                println!("no player #{id}");
            }
        }
        Command::Amount(amount) => {
            session.set_card_amount(amount);
            println!("card amount set to {amount}");
        }
        Command::Include(tags) => {
            let excluded = session.state().excluded_tags.clone();
            session.set_tags(tags, excluded);
            report_available(session);
        }
        Command::Exclude(tags) => {
            let included = session.state().included_tags.clone();
            session.set_tags(included, tags);
            report_available(session);
        }
        Command::Tags => print_tags(session),
        Command::Lobby => {
            session.change_state(ApplicationState::Lobby);
            print_status(session);
        }
        Command::Start => match session.start_game() {
            Ok(()) => print_card(session),
            Err(err) => println!("cannot start: {err}"),
        },
        Command::Next => {
            if session.state().state != ApplicationState::Playing {
                println!("no game running");
                return Ok(());
            }
            session.show_next_card();
            if let Some(event) = &session.state().ending_event {
                println!("event over: {} ({})", event.title, event.person);
            }
            if session.state().state == ApplicationState::Ending {
                println!("that was the last card");
            } else {
                print_card(session);
            }
        }
        Command::Card => print_card(session),
        Command::Reroll => {
            let index = session.state().current_card_index;
            if session.reroll_card(index) {
                print_card(session);
            } else {
                println!("nothing to reroll");
            }
        }
        Command::Lang(language) => {
            session.change_language(language);
            print_card(session);
        }
        Command::Events => print_events(session),
        Command::State => {
            let body = serde_json::to_string_pretty(session.state()).context("encode state")?;
            println!("{body}");
        }
        Command::Reset => {
            session.reset();
            print_status(session);
        }
        Command::Quit => {}
    }
    Ok(())
}

fn report_available(session: &mut Session) {
    if session.state().state == ApplicationState::Playing {
        println!("tag changes apply to the next game");
        return;
    }
    let available = session.initialize_max_cards();
    println!("{available} cards match the tag selection");
}

fn print_status(session: &Session) {
    let state = session.state();
    println!(
        "state: {} | players: {} | language: {}",
        state_label(state.state),
        state.players.len(),
        session.language()
    );
}

fn print_players(session: &Session) {
    let state = session.state();
    if state.players.is_empty() {
        println!("no players");
        return;
    }
    for (slot, player) in state.players.iter().enumerate() {
        let marker = if state.state == ApplicationState::Playing && slot == state.current_player_index {
            "*"
        } else {
            " "
        };
        match &player.event {
            Some(event) => println!("{marker} #{} {} [{}]", player.id, player.name, event.title),
            None => println!("{marker} #{} {}", player.id, player.name),
        }
    }
}

fn print_tags(session: &Session) {
    let state = session.state();
    let join = |tags: &[partydeck_core::Tag]| {
        tags.iter()
            .map(|tag| tag.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    println!("included: {}", join(&state.included_tags));
    println!("excluded: {}", join(&state.excluded_tags));
}

fn print_events(session: &Session) {
    let mut any = false;
    for event in session.state().alive_events() {
        any = true;
        println!("{} - {} (slot {})", event.title, event.person, event.starting_index);
    }
    if !any {
        println!("no running events");
    }
}

fn print_card(session: &mut Session) {
    let total = session.state().card_amount.unwrap_or(0);
    let index = session.state().current_card_index;
    let (title, description) = match session.current_card() {
        Some(card) => (card.title.clone(), card.description.clone()),
        None => {
            println!("no card");
            return;
        }
    };
    let player = session
        .current_player()
        .map(|player| player.name.clone())
        .unwrap_or_else(|| "everyone".to_string());
    println!("[{}/{}] {player}: {title}", index + 1, total);
    match session.target() {
        Some(target) => println!("  {}", description.replace("{target}", &target)),
        None => println!("  {description}"),
    }
}
