use clap::{ArgAction, Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "presentations",
    version,
    about = "manage and browse a local presentation catalogue",
    long_about = "Presentations keeps a list of presentation links (title, link, category) in a local storage file.\nThe admin commands add, edit and delete saved presentations; the gallery shows them together with the built-in defaults, filtered by category or searched by title.\n\nExamples:\n  presentations add -t \"Quarterly review\" -l https://docs.example.com/deck -c product\n  presentations list\n  presentations gallery -c training\n  presentations gallery -q лекс -f html -o gallery.html\n\nTip: Use --config to keep the storage location and date format out of every invocation."
)]
pub struct CliArgs {
    #[arg(
        short = 'v',
        long = "vb",
        visible_alias = "verbose",
        action = ArgAction::Count,
        global = true,
        help_heading = "Output",
        help = "Increase verbosity (-v, -vv)."
    )]
    pub verbose: u8,

    #[arg(
        long = "clr",
        visible_alias = "color",
        global = true,
        help_heading = "Output",
        help = "Enable colored output (overrides --no-color)."
    )]
    pub color: bool,

    #[arg(
        long = "nc",
        visible_alias = "no-color",
        global = true,
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        global = true,
        help_heading = "Storage",
        help = "Path to config file (defaults to ~/.presentations/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 's',
        long = "st",
        visible_alias = "storage",
        value_name = "FILE",
        global = true,
        help_heading = "Storage",
        help = "Storage file holding saved presentations."
    )]
    pub storage: Option<String>,

    #[arg(
        short = 'k',
        long = "key",
        visible_alias = "storage-key",
        value_name = "KEY",
        global = true,
        help_heading = "Storage",
        help = "Key the collection is stored under (default: presentationData)."
    )]
    pub key: Option<String>,

    #[arg(
        long = "df",
        visible_alias = "date-format",
        value_name = "PATTERN",
        global = true,
        help_heading = "Admin",
        help = "strftime pattern stamped on new presentations (default: %d.%m.%Y)."
    )]
    pub date_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List saved presentations with their position and id.
    List,

    /// Add a presentation to the end of the saved list.
    Add(FormArgs),

    /// Replace the saved presentation at INDEX, keeping its date and id.
    Update {
        #[arg(value_name = "INDEX")]
        index: usize,

        #[command(flatten)]
        form: FormArgs,
    },

    /// Take the presentation at INDEX out and add it back at the end with the given changes.
    Edit(EditArgs),

    /// Delete a saved presentation by position or id.
    Delete(DeleteArgs),

    /// Show saved and built-in presentations, optionally filtered.
    Gallery(GalleryArgs),

    /// List the categories present in the gallery.
    Categories,

    /// Remove every saved presentation.
    Clear,

    /// Write a commented default config file.
    InitConfig,
}

#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    #[arg(short = 't', long = "title", value_name = "TITLE", help = "Presentation title.")]
    pub title: String,

    #[arg(short = 'l', long = "link", value_name = "URL", help = "Presentation link.")]
    pub link: String,

    #[arg(
        short = 'c',
        long = "category",
        value_name = "TAG",
        default_value = "",
        hide_default_value = true,
        help = "Category tag (empty becomes \"other\")."
    )]
    pub category: String,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    #[arg(value_name = "INDEX")]
    pub index: usize,

    #[arg(short = 't', long = "title", value_name = "TITLE", help = "New title.")]
    pub title: Option<String>,

    #[arg(short = 'l', long = "link", value_name = "URL", help = "New link.")]
    pub link: Option<String>,

    #[arg(short = 'c', long = "category", value_name = "TAG", help = "New category.")]
    pub category: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[arg(
        value_name = "INDEX",
        required_unless_present = "id",
        conflicts_with = "id"
    )]
    pub index: Option<usize>,

    #[arg(long = "id", value_name = "ID", help = "Delete by stable id instead of position.")]
    pub id: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct GalleryArgs {
    #[arg(
        short = 'c',
        long = "category",
        value_name = "TAG",
        help = "Only show this category (\"all\" shows everything)."
    )]
    pub category: Option<String>,

    #[arg(
        short = 'q',
        long = "search",
        value_name = "QUERY",
        help = "Case-insensitive title search; resets the category filter unless --combine is set."
    )]
    pub search: Option<String>,

    #[arg(long = "combine", help = "Apply --category and --search together.")]
    pub combine: bool,

    #[arg(
        short = 'f',
        long = "format",
        value_name = "FORMAT",
        help = "Output format: text, json or html (inferred from --output when omitted)."
    )]
    pub format: Option<String>,

    #[arg(short = 'o', long = "output", value_name = "FILE", help = "Write the gallery to a file.")]
    pub output: Option<String>,
}
