use partydeck_core::{ApplicationState, Language, Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Players,
    Add(String),
    Remove(u32),
    Amount(usize),
    Include(Vec<Tag>),
    Exclude(Vec<Tag>),
    Tags,
    Lobby,
    Start,
    Next,
    Card,
    Reroll,
    Lang(Language),
    Events,
    State,
    Reset,
    Quit,
}

pub const HELP: &str = "\
commands:
  players              list players in turn order
  add <name>           add a player
  remove <id>          remove a player by id
  amount <n>           number of cards to play
  include <tag..>      tags a card needs one of (default: all)
  exclude <tag..>      tags that drop a card
  tags                 show the tag selection
  lobby                go to the lobby
  start                draw cards and start playing
  next | n             show the next card
  card                 show the current card
  reroll               replace the current card
  lang <fi|en>         switch card language
  events               list running events
  state                dump the game state as json
  reset                forget everything
  quit | exit          leave";

pub fn parse_command(line: &str) -> Result<Command, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = parts.collect();
    let command = match head.to_ascii_lowercase().as_str() {
        "help" | "h" | "?" => Command::Help,
        "players" | "p" => Command::Players,
        "add" | "a" => {
            let name = rest.join(" ");
            if name.is_empty() {
                return Err("usage: add <name>".to_string());
            }
            Command::Add(name)
        }
        "remove" | "rm" => {
            let id = single(&rest, "remove <id>")?
                .parse::<u32>()
                .map_err(|_| "player id must be a number".to_string())?;
            Command::Remove(id)
        }
        "amount" => {
            let amount = single(&rest, "amount <n>")?
                .parse::<usize>()
                .map_err(|_| "amount must be a number".to_string())?;
            Command::Amount(amount)
        }
        "include" => Command::Include(parse_tags(&rest)?),
        "exclude" => Command::Exclude(parse_tags(&rest)?),
        "tags" => Command::Tags,
        "lobby" => Command::Lobby,
        "start" => Command::Start,
        "next" | "n" => Command::Next,
        "card" | "c" => Command::Card,
        "reroll" | "r" => Command::Reroll,
        "lang" | "l" => {
            let code = single(&rest, "lang <fi|en>")?;
            let language = code.parse::<Language>().map_err(|err| err.to_string())?;
            Command::Lang(language)
        }
        "events" | "e" => Command::Events,
        "state" | "s" => Command::State,
        "reset" => Command::Reset,
        "quit" | "exit" | "q" | "x" => Command::Quit,
        other => return Err(format!("unknown command: {other} (try help)")),
    };
    Ok(command)
}

pub fn state_label(state: ApplicationState) -> &'static str {
    match state {
        ApplicationState::Start => "start",
        ApplicationState::Lobby => "lobby",
        ApplicationState::Playing => "playing",
        ApplicationState::Ending => "ending",
    }
}

fn single<'a>(rest: &[&'a str], usage: &str) -> Result<&'a str, String> {
    match rest {
        [value] => Ok(*value),
        _ => Err(format!("usage: {usage}")),
    }
}

fn parse_tags(rest: &[&str]) -> Result<Vec<Tag>, String> {
    rest.iter()
        .flat_map(|chunk| chunk.split(','))
        .filter(|chunk| !chunk.is_empty())
        .map(|chunk| chunk.parse::<Tag>().map_err(|err| err.to_string()))
        .collect()
}
