//! Per-run REPL state and command execution
//!
//! A `Session` owns the API client, the location-area pagination cursors and
//! the pokedex. It is created once by the main loop and every command runs
//! against it.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::{LocationAreaPage, PokeApiClient, Pokemon};
use crate::commands::{help_text, Command, CommandError};

/// Highest roll that still catches the pokemon
const CATCH_THRESHOLD: u32 = 50;

/// Where the next `Next` command should fetch from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Nothing has been listed yet; fetch the first page
    First,
    /// Fetch the page at this URL
    Url(String),
    /// The last page has been shown
    Exhausted,
}

/// What the REPL should do after a command succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Print this text and keep going
    Text(String),
    /// Leave the loop
    Quit,
}

/// State shared by all commands in one run of the REPL
#[derive(Debug)]
pub struct Session {
    client: PokeApiClient,
    next_page: NextPage,
    previous_page: Option<String>,
    pokedex: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    /// Creates a session with an entropy-seeded catch RNG
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    /// Creates a session with a caller-supplied catch RNG
    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            next_page: NextPage::First,
            previous_page: None,
            pokedex: BTreeMap::new(),
            rng,
        }
    }

    pub fn client(&self) -> &PokeApiClient {
        &self.client
    }

    pub fn next_page(&self) -> &NextPage {
        &self.next_page
    }

    pub fn previous_page(&self) -> Option<&str> {
        self.previous_page.as_deref()
    }

    /// Caught pokemon, keyed by the name used to catch them
    pub fn pokedex(&self) -> &BTreeMap<String, Pokemon> {
        &self.pokedex
    }

    /// Runs a single command against this session
    pub async fn execute(&mut self, command: Command) -> Result<CommandOutput, CommandError> {
        let text = match command {
            Command::Help => help_text(),
            Command::Quit => return Ok(CommandOutput::Quit),
            Command::Next => self.show_next_page().await?,
            Command::Prev => self.show_previous_page().await?,
            Command::Explore(area) => self.explore(&area).await?,
            Command::Catch(name) => self.catch(&name).await?,
            Command::Inspect(name) => self.inspect(&name)?,
            Command::List => self.list_caught()?,
        };
        Ok(CommandOutput::Text(text))
    }

    async fn show_next_page(&mut self) -> Result<String, CommandError> {
        let cursor = match &self.next_page {
            NextPage::Exhausted => return Err(CommandError::LastPage),
            NextPage::First => None,
            NextPage::Url(url) => Some(url.clone()),
        };

        let page = self.client.list_location_areas(cursor.as_deref()).await?;
        Ok(self.apply_page(page))
    }

    async fn show_previous_page(&mut self) -> Result<String, CommandError> {
        let cursor = self.previous_page.clone().ok_or(CommandError::FirstPage)?;

        let page = self.client.list_location_areas(Some(&cursor)).await?;
        Ok(self.apply_page(page))
    }

    /// Moves both cursors to the ones the page reports and formats the listing
    fn apply_page(&mut self, page: LocationAreaPage) -> String {
        self.next_page = match page.next {
            Some(url) => NextPage::Url(url),
            None => NextPage::Exhausted,
        };
        self.previous_page = page.previous;

        let mut out = String::from("Location areas:\n");
        for area in &page.results {
            let _ = writeln!(out, "- {}", area.name);
        }
        out
    }

    async fn explore(&self, area_name: &str) -> Result<String, CommandError> {
        let area = self.client.location_area(area_name).await?;

        let mut out = format!("Pokemon in {}:\n", area_name);
        for encounter in &area.pokemon_encounters {
            let _ = writeln!(out, "- {}", encounter.pokemon.name);
        }
        Ok(out)
    }

    async fn catch(&mut self, name: &str) -> Result<String, CommandError> {
        let pokemon = self.client.pokemon(name).await?;

        if !attempt_catch(&mut self.rng, pokemon.base_experience) {
            return Err(CommandError::CatchFailed(name.to_string()));
        }

        self.pokedex.insert(name.to_string(), pokemon);
        Ok(format!("{} was caught!\n", name))
    }

    fn inspect(&self, name: &str) -> Result<String, CommandError> {
        let pokemon = self
            .pokedex
            .get(name)
            .ok_or_else(|| CommandError::NotCaught(name.to_string()))?;
        Ok(format_pokemon(pokemon))
    }

    fn list_caught(&self) -> Result<String, CommandError> {
        if self.pokedex.is_empty() {
            return Err(CommandError::EmptyPokedex);
        }

        let mut out = String::from("Your Pokedex:\n");
        for pokemon in self.pokedex.values() {
            let _ = writeln!(out, " - {}", pokemon.name);
        }
        Ok(out)
    }
}

/// Rolls for a catch; harder for pokemon with more base experience
///
/// The roll is uniform in `0..base_experience` and succeeds at or below
/// `CATCH_THRESHOLD`. A missing or zero base experience always succeeds.
pub fn attempt_catch<R: Rng + ?Sized>(rng: &mut R, base_experience: Option<u32>) -> bool {
    let upper = base_experience.unwrap_or(0).max(1);
    rng.gen_range(0..upper) <= CATCH_THRESHOLD
}

/// Formats the inspection view of a caught pokemon
pub fn format_pokemon(pokemon: &Pokemon) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name: {}", pokemon.name);
    let _ = writeln!(out, "Height: {}", pokemon.height);
    let _ = writeln!(out, "Weight: {}", pokemon.weight);
    out.push_str("Stats:\n");
    for stat in &pokemon.stats {
        let _ = writeln!(out, "  - {}: {}", stat.stat.name, stat.base_stat);
    }
    out.push_str("Types:\n");
    for kind in &pokemon.types {
        let _ = writeln!(out, "  - {}", kind.kind.name);
    }
    out
}
