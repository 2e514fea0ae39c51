//! # CLI Layer
//!
//! This module is **one possible UI client** for pagepad. It is the only place
//! that knows about stdin/stdout, prompts, colors, and exit codes.
//!
//! One-shot subcommands open a session, perform one action through the API, and
//! print the resulting render instructions. `pagepad shell` keeps a session open
//! and feeds it line by line (see [`shell`]).

mod print;
mod setup;
mod shell;

use clap::Parser;
use pagepad::api::{parse_page_id, CmdMessage, CmdResult};
use pagepad::error::{PageError, Result};
use pagepad::init::{initialize, PagesContext};
use pagepad::model::PageId;
use print::{print_messages, print_pages, print_results};
use setup::{Cli, Commands};
use std::io::{self, BufRead, IsTerminal, Read, Write};

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = initialize(cli.dir.clone())?;

    match cli.command {
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::Show { id }) => handle_show(&ctx, &id),
        Some(Commands::Add { text }) => handle_add(&mut ctx, text),
        Some(Commands::Write { id, text }) => handle_write(&mut ctx, &id, text),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut ctx, &id, yes),
        Some(Commands::Search { keyword }) => handle_search(&mut ctx, &keyword.join(" ")),
        Some(Commands::Shell) => handle_shell(&mut ctx),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn handle_list(ctx: &PagesContext) -> Result<()> {
    let result = ctx.api.refresh()?;
    let mut out = io::stdout().lock();
    print_pages(&mut out, &result.pages, None)?;
    Ok(())
}

fn handle_show(ctx: &PagesContext, id: &str) -> Result<()> {
    let id = existing_page(ctx, id)?;
    let body = ctx.api.store().get_body(&id)?;

    let mut out = io::stdout().lock();
    write!(out, "{}", body)?;
    if !body.is_empty() && !body.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

fn handle_add(ctx: &mut PagesContext, text: Vec<String>) -> Result<()> {
    let body = body_from_args_or_stdin(text)?;

    let mut result = ctx.api.add_page()?;
    if let Some(body) = body {
        let messages = std::mem::take(&mut result.messages);
        result = ctx.api.edit(body)?;
        result.messages = messages;
    }

    print_result_messages(&result)
}

fn handle_write(ctx: &mut PagesContext, id: &str, text: Vec<String>) -> Result<()> {
    let body = body_from_args_or_stdin(text)?.ok_or_else(|| {
        PageError::Api("No text given: pass it as arguments or pipe it on stdin".to_string())
    })?;

    ctx.api.switch_page(id)?;
    let result = ctx.api.edit(body)?.with_message(CmdMessage::success(format!(
        "Page saved ({}): {}",
        ctx.api.session().active(),
        ctx.api.active_title()?
    )));

    print_result_messages(&result)
}

fn handle_delete(ctx: &mut PagesContext, id: &str, yes: bool) -> Result<()> {
    let target = existing_page(ctx, id)?;

    let confirmed = yes || !ctx.config.confirm_delete || {
        let collection = ctx.api.collection()?;
        confirm(&format!("Delete {} \"{}\"?", target, collection.title(&target)))?
    };

    // Only a confirmed delete opens the page; declining leaves the store untouched.
    if confirmed {
        ctx.api.open_page(target)?;
    }
    let result = ctx.api.delete_page(confirmed)?;
    print_result_messages(&result)
}

fn handle_search(ctx: &mut PagesContext, keyword: &str) -> Result<()> {
    let result = ctx.api.search(keyword)?;
    let mut out = io::stdout().lock();
    print_messages(&mut out, &result.messages)?;
    if let Some(results) = &result.results {
        print_results(&mut out, results)?;
    }
    Ok(())
}

fn handle_shell(ctx: &mut PagesContext) -> Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    shell::Shell::new(&mut ctx.api, ctx.config.confirm_delete).run(stdin.lock(), &mut out)
}

fn print_result_messages(result: &CmdResult) -> Result<()> {
    let mut out = io::stdout().lock();
    print_messages(&mut out, &result.messages)?;
    Ok(())
}

/// Resolve `id` to a page in the stored collection without opening it.
fn existing_page(ctx: &PagesContext, id: &str) -> Result<PageId> {
    let id = parse_page_id(id)?;
    if ctx.api.collection()?.contains(&id) {
        Ok(id)
    } else {
        Err(PageError::PageNotFound(id))
    }
}

/// Body text from the trailing arguments, else from piped stdin, else nothing.
fn body_from_args_or_stdin(args: Vec<String>) -> Result<Option<String>> {
    if !args.is_empty() {
        return Ok(Some(args.join(" ")));
    }

    if io::stdin().is_terminal() {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok((!buffer.is_empty()).then_some(buffer))
}

fn confirm(question: &str) -> Result<bool> {
    let mut out = io::stdout().lock();
    write!(out, "{} [y/N] ", question)?;
    out.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
