use std::path::PathBuf;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crate::admin::{AdminController, RecordForm, DEFAULT_DATE_FORMAT};
use crate::cli::args::{CliArgs, Command, DeleteArgs, EditArgs, FormArgs, GalleryArgs};
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::gallery::{self, CategoryFilter, GalleryQuery};
use crate::output::{self, OutputFormat};
use crate::record::RecordId;
use crate::store::{FileStorage, PresentationStore, DEFAULT_STORAGE_KEY};

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    storage_path: PathBuf,
    storage_key: String,
    date_format: String,
    output_format: Option<OutputFormat>,
    no_color: bool,
    verbose: u8,
    command: Command,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let no_color = if args.color {
        false
    } else {
        args.no_color || cfg.no_color.unwrap_or(false)
    };
    let verbose = args.verbose.max(cfg.verbose.unwrap_or(0));

    let storage_path = args
        .storage
        .or(cfg.storage_path)
        .map(|p| config::expand_tilde(&p))
        .unwrap_or_else(config::default_storage_path);

    let storage_key = args
        .key
        .or(cfg.storage_key)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string());

    let date_format = match args.date_format {
        Some(format) => format,
        None => match cfg.date_format {
            Some(format) if crate::admin::is_valid_date_format(&format) => format,
            Some(format) => return Err(format!("invalid date_format '{format}' in config")),
            None => DEFAULT_DATE_FORMAT.to_string(),
        },
    };

    let output_format = match cfg.output_format.as_deref() {
        Some(raw) => Some(
            OutputFormat::parse(raw)
                .ok_or_else(|| format!("invalid output_format '{raw}' in config"))?,
        ),
        None => None,
    };

    Ok(RunConfig {
        storage_path,
        storage_key,
        date_format,
        output_format,
        no_color,
        verbose,
        command: args.command,
    })
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("presentations={level}")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn form_from_args(form: FormArgs) -> RecordForm {
    RecordForm::new(form.title, form.link, form.category)
}

fn run_list(admin: &AdminController<'_, FileStorage>) {
    let saved = admin.saved();
    format_kv_line("Saved", &saved.len().to_string());
    if saved.is_empty() {
        return;
    }
    println!();
    print!("{}", output::render_admin_text(&saved));
}

fn run_add(admin: &AdminController<'_, FileStorage>, form: FormArgs) -> Result<(), String> {
    let form = form_from_args(form);
    let id = admin.on_add(&form).map_err(|e| e.to_string())?;
    println!("{} {}", "added".green().bold(), form.title.trim());
    format_kv_line("Id", &id.to_string());
    Ok(())
}

fn run_update(
    admin: &AdminController<'_, FileStorage>,
    index: usize,
    form: FormArgs,
) -> Result<(), String> {
    let form = form_from_args(form);
    admin.on_update(index, &form).map_err(|e| e.to_string())?;
    println!("{} #{index} {}", "updated".green().bold(), form.title.trim());
    Ok(())
}

fn run_edit(
    store: &PresentationStore<FileStorage>,
    admin: &AdminController<'_, FileStorage>,
    edit: EditArgs,
) -> Result<(), String> {
    let mut form = RecordForm::from(store.get(edit.index).map_err(|e| e.to_string())?);
    if let Some(title) = edit.title {
        form.title = title;
    }
    if let Some(link) = edit.link {
        form.link = link;
    }
    if let Some(category) = edit.category {
        form.category = category;
    }
    let id = admin
        .on_resubmit(edit.index, &form)
        .map_err(|e| e.to_string())?;
    println!("{} {}", "edited".green().bold(), form.title.trim());
    format_kv_line("Id", &id.to_string());
    Ok(())
}

fn run_delete(admin: &AdminController<'_, FileStorage>, delete: DeleteArgs) -> Result<(), String> {
    let removed = match (delete.id.as_deref(), delete.index) {
        (Some(raw), _) => {
            let id: RecordId = raw
                .parse()
                .map_err(|e| format!("invalid --id '{raw}': {e}"))?;
            admin.on_delete_id(id)
        }
        (None, Some(index)) => admin.on_delete(index),
        (None, None) => return Err("delete requires an INDEX or --id".to_string()),
    }
    .map_err(|e| e.to_string())?;
    println!("{} {}", "deleted".red().bold(), removed.title);
    Ok(())
}

fn gallery_query(args: &GalleryArgs) -> GalleryQuery {
    GalleryQuery {
        category: args
            .category
            .as_deref()
            .map(CategoryFilter::parse)
            .unwrap_or_default(),
        search: args.search.clone(),
        combine: args.combine,
    }
}

fn run_gallery(
    store: &PresentationStore<FileStorage>,
    fallback_format: Option<OutputFormat>,
    args: GalleryArgs,
) -> Result<(), String> {
    let format = args
        .format
        .as_deref()
        .and_then(OutputFormat::parse)
        .or_else(|| args.output.as_deref().and_then(output::infer_format_from_path))
        .or(fallback_format)
        .unwrap_or(OutputFormat::Text);

    let query = gallery_query(&args);
    let records = gallery::view(store, &query);
    let cards = output::build_cards(&records);
    let rendered = output::render(format, &cards);

    match args.output.as_deref() {
        Some(path) => {
            let path = config::expand_tilde(path);
            std::fs::write(&path, rendered)
                .map_err(|e| format!("failed to write output '{}': {e}", path.display()))?;
            format_kv_line("Shown", &cards.len().to_string());
            format_kv_line("Output", &path.display().to_string());
        }
        None => {
            use std::io::Write;
            std::io::stdout()
                .write_all(&rendered)
                .map_err(|e| format!("failed to write output: {e}"))?;
        }
    }
    Ok(())
}

fn run_categories(store: &PresentationStore<FileStorage>) {
    for category in gallery::categories(&store.get_all()) {
        println!("{}", category.cyan());
    }
    println!("{}", gallery::ALL_CATEGORIES.dimmed());
}

fn run_init_config() -> Result<(), String> {
    let path = config::default_config_path()
        .ok_or_else(|| "could not determine home directory".to_string())?;
    let created = config::ensure_default_config_file(&path)?;
    format_kv_line("Config", &path.display().to_string());
    format_kv_line("Created", format_bool(created));
    Ok(())
}

fn run(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    init_logging(run.verbose);

    if let Command::InitConfig = run.command {
        return run_init_config();
    }

    if run.verbose > 0 {
        format_kv_line("Storage", &run.storage_path.display().to_string());
        format_kv_line("Key", &run.storage_key);
    }

    let storage = FileStorage::new(&run.storage_path);
    let store = PresentationStore::open(storage, run.storage_key.as_str());
    let admin = AdminController::with_date_format(&store, &run.date_format);

    match run.command {
        Command::List => {
            run_list(&admin);
            Ok(())
        }
        Command::Add(form) => run_add(&admin, form),
        Command::Update { index, form } => run_update(&admin, index, form),
        Command::Edit(edit) => run_edit(&store, &admin, edit),
        Command::Delete(delete) => run_delete(&admin, delete),
        Command::Gallery(args) => run_gallery(&store, run.output_format, args),
        Command::Categories => {
            run_categories(&store);
            Ok(())
        }
        Command::Clear => {
            store.clear().map_err(|e| e.to_string())?;
            println!("{}", "cleared saved presentations".yellow());
            Ok(())
        }
        Command::InitConfig => Ok(()),
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                print!("{}", e.render());
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path), false)?,
        None => match config::default_config_path() {
            Some(path) => config::load_config(&path, true)?,
            None => ConfigFile::default(),
        },
    };

    let run_config = build_run_config(args, cfg)?;
    run(run_config)
}
