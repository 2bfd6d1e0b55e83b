use std::io::{BufRead, Write};

use anyhow::{Context, anyhow};
use chrono::NaiveDate;
use ticklist_model::{Action, InputRequest, KeyValueStore, Outcome, Store, TaskPatch, View};
use tracing::{debug, info, instrument};

use crate::cli::{Command, EditArgs, ListCommand, SubtaskCommand, TagCommand};
use crate::render::{Renderer, short_id};

/// Resolves `token` against `known` ids: an exact match wins, otherwise the
/// token must be a prefix of exactly one id.
pub fn resolve_prefix<'a, I>(token: &str, known: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let known: Vec<&str> = known.into_iter().collect();
    if let Some(exact) = known.iter().copied().find(|id| *id == token) {
        return Some(exact);
    }

    let mut matches = known.into_iter().filter(|id| id.starts_with(token));
    let first = matches.next()?;
    if matches.next().is_some() {
        None
    } else {
        Some(first)
    }
}

fn resolve_task<S: KeyValueStore>(store: &Store<S>, token: &str) -> anyhow::Result<String> {
    let ids = store.state().tasks.iter().map(|task| task.id.as_str());
    resolve_prefix(token, ids)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no unique task matches id: {token}"))
}

fn resolve_list<S: KeyValueStore>(store: &Store<S>, token: &str) -> anyhow::Result<String> {
    let ids = store.state().lists.iter().map(|list| list.id.as_str());
    resolve_prefix(token, ids)
        .map(str::to_string)
        .ok_or_else(|| anyhow!("no unique list matches id: {token}"))
}

/// Parses a view token, completing a list id prefix when exactly one list
/// matches. Unmatched tokens are kept as given.
fn resolve_view<S: KeyValueStore>(store: &Store<S>, token: &str) -> View {
    match View::parse(token) {
        View::List(raw) => {
            let ids = store.state().lists.iter().map(|list| list.id.as_str());
            let id = resolve_prefix(&raw, ids).map(str::to_string).unwrap_or(raw);
            View::List(id)
        }
        other => other,
    }
}

/// Collects the text for `request`, from the argument when given or from
/// one line of `input` otherwise.
pub fn fulfil<R: BufRead>(
    request: &InputRequest,
    given: Option<String>,
    input: &mut R,
) -> anyhow::Result<Option<Action>> {
    let text = match given {
        Some(text) => text,
        None => {
            eprint!("{} ", request.label());
            std::io::stderr().flush()?;
            let mut line = String::new();
            input
                .read_line(&mut line)
                .context("failed to read input")?;
            line
        }
    };
    Ok(request.respond(&text))
}

#[instrument(skip(store, renderer, input, today))]
pub fn dispatch<S, R>(
    store: &mut Store<S>,
    renderer: &Renderer,
    command: Command,
    today: NaiveDate,
    input: &mut R,
) -> anyhow::Result<()>
where
    S: KeyValueStore,
    R: BufRead,
{
    debug!(?command, %today, "dispatching command");

    let search = match &command {
        Command::Show { search } => search.clone(),
        _ => String::new(),
    };

    let action = match command {
        Command::Show { .. } => None,
        Command::Add { title } => fulfil(&InputRequest::TaskTitle, title, input)?,
        Command::Toggle { id } => Some(Action::ToggleTaskCompletion {
            id: resolve_task(store, &id)?,
        }),
        Command::Edit(args) => Some(edit_action(store, args)?),
        Command::Delete { id } => Some(Action::DeleteTask {
            id: resolve_task(store, &id)?,
        }),
        Command::Select { id } => Some(Action::SelectTask {
            id: resolve_task(store, &id)?,
        }),
        Command::View { view } => Some(Action::SetView {
            view: resolve_view(store, view.trim()),
        }),
        Command::Subtask(SubtaskCommand::Add { task, text }) => {
            let request = InputRequest::Subtask {
                task_id: resolve_task(store, &task)?,
            };
            fulfil(&request, text, input)?
        }
        Command::Subtask(SubtaskCommand::Toggle { task, index }) => Some(Action::ToggleSubtask {
            task_id: resolve_task(store, &task)?,
            index,
        }),
        Command::TagTask { task, tag } => Some(Action::AddTagToTask {
            task_id: resolve_task(store, &task)?,
            tag,
        }),
        Command::List(ListCommand::Add { name }) => fulfil(&InputRequest::ListName, name, input)?,
        Command::List(ListCommand::Delete { id }) => Some(Action::DeleteList {
            id: resolve_list(store, &id)?,
        }),
        Command::Tag(TagCommand::Add { name }) => fulfil(&InputRequest::TagName, name, input)?,
        Command::Tag(TagCommand::Remove { name }) => Some(Action::RemoveTag { name }),
        Command::Theme { toggle } => {
            let theme = if toggle {
                store.toggle_theme().context("failed to save theme")?
            } else {
                store.theme()
            };
            return renderer.print_theme(theme);
        }
    };

    if let Some(action) = action {
        let name = action.name();
        let outcome = store
            .apply(action, today)
            .with_context(|| format!("failed to save after {name}"))?;
        report(name, &outcome);
    } else {
        debug!("nothing to apply");
    }

    renderer.print_view(&store.view(&search, today))
}

fn edit_action<S: KeyValueStore>(store: &Store<S>, args: EditArgs) -> anyhow::Result<Action> {
    let id = resolve_task(store, &args.id)?;
    let list_id = match args.list {
        Some(list) if !list.trim().is_empty() => Some(resolve_list(store, list.trim())?),
        other => other,
    };
    Ok(Action::UpdateTaskFields {
        id,
        patch: TaskPatch {
            title: args.title,
            description: args.description,
            list_id,
            due_date: args.due,
        },
    })
}

fn report(action: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Created(id) => {
            info!(action, id = %id, "created");
            println!("Created {}.", short_id(id));
        }
        Outcome::Changed => info!(action, "changed"),
        Outcome::Unchanged => {
            debug!(action, "nothing changed");
            eprintln!("Nothing changed.");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use ticklist_model::{MemoryStore, Theme};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    fn run(store: &mut Store<MemoryStore>, command: Command, input: &str) {
        dispatch(
            store,
            &Renderer::plain(),
            command,
            today(),
            &mut Cursor::new(input.to_string()),
        )
        .expect("dispatch");
    }

    #[test]
    fn prefixes_resolve_only_when_unique() {
        let ids = ["abc123", "abd456", "work"];
        assert_eq!(resolve_prefix("abc", ids), Some("abc123"));
        assert_eq!(resolve_prefix("ab", ids), None);
        assert_eq!(resolve_prefix("work", ids), Some("work"));
        assert_eq!(resolve_prefix("zzz", ids), None);
    }

    #[test]
    fn exact_match_beats_longer_prefix_matches() {
        let ids = ["ab", "abc"];
        assert_eq!(resolve_prefix("ab", ids), Some("ab"));
    }

    #[test]
    fn add_without_title_reads_a_line() {
        let mut store = Store::open(MemoryStore::new());
        run(&mut store, Command::Add { title: None }, "  Water plants \n");
        assert_eq!(store.state().tasks[0].title, "Water plants");
    }

    #[test]
    fn blank_prompt_answer_adds_nothing() {
        let mut store = Store::open(MemoryStore::new());
        run(&mut store, Command::Add { title: None }, "\n");
        assert!(store.state().tasks.is_empty());
    }

    #[test]
    fn edit_resolves_task_and_list_prefixes() {
        let mut store = Store::open(MemoryStore::new());
        run(
            &mut store,
            Command::Add {
                title: Some("Report".to_string()),
            },
            "",
        );
        let id = store.state().tasks[0].id.clone();

        run(
            &mut store,
            Command::Edit(EditArgs {
                id: id[..6].to_string(),
                title: None,
                description: Some("quarterly".to_string()),
                list: Some("wo".to_string()),
                due: Some("2026-11-01".to_string()),
            }),
            "",
        );

        let task = &store.state().tasks[0];
        assert_eq!(task.description, "quarterly");
        assert_eq!(task.list_id.as_deref(), Some("work"));
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2026, 11, 1));
    }

    #[test]
    fn unknown_task_ids_are_errors() {
        let mut store = Store::open(MemoryStore::new());
        let err = dispatch(
            &mut store,
            &Renderer::plain(),
            Command::Toggle {
                id: "nope".to_string(),
            },
            today(),
            &mut Cursor::new(String::new()),
        )
        .expect_err("unknown id");
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn theme_toggle_is_persisted() {
        let mut store = Store::open(MemoryStore::new());
        run(&mut store, Command::Theme { toggle: true }, "");
        assert_eq!(store.theme(), Theme::Dark);
        assert_eq!(Store::open(store.into_backend()).theme(), Theme::Dark);
    }

    #[test]
    fn view_completes_list_prefixes() {
        let mut store = Store::open(MemoryStore::new());

        run(&mut store, Command::View { view: "wo".to_string() }, "");
        assert_eq!(store.state().current_view, View::List("work".to_string()));

        run(&mut store, Command::View { view: " today ".to_string() }, "");
        assert_eq!(store.state().current_view, View::Today);
    }

    #[test]
    fn view_keeps_tokens_matching_no_list() {
        let mut store = Store::open(MemoryStore::new());

        run(&mut store, Command::View { view: "archive".to_string() }, "");
        assert_eq!(
            store.state().current_view,
            View::List("archive".to_string())
        );
    }

    #[test]
    fn repeated_command_is_a_quiet_no_op() {
        let mut store = Store::open(MemoryStore::new());
        run(&mut store, Command::View { view: "upcoming".to_string() }, "");
        let before = store.state().clone();

        run(&mut store, Command::View { view: "upcoming".to_string() }, "");
        assert_eq!(store.state(), &before);
    }
}
