//! Shopdex - browse the shop's creatures in the terminal

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{layout::Rect, Frame, Terminal};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

use shopdex::action::Action;
use shopdex::api;
use shopdex::components::{Component, ShopBrowser, ShopBrowserProps};
use shopdex::config::{self, Preferences};
use shopdex::data::{Catalog, Emotion, Pkm};
use shopdex::effect::Effect;
use shopdex::i18n::Translations;
use shopdex::portrait::DEFAULT_PORTRAIT_BASE;
use shopdex::reducer::reducer;
use shopdex::sprite;
use shopdex::sprite_backend::{self, SpriteBackend};
use shopdex::state::{AppState, SessionConfig};

/// Shop creature browser
#[derive(Parser, Debug)]
#[command(name = "shopdex")]
#[command(about = "Browse shop creatures: portrait, stats, dish, passive and ability")]
struct Args {
    /// RON catalog replacing the built-in species table
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON translation file replacing the built-in English strings
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Portrait location prefix (URL or directory)
    #[arg(long, default_value = DEFAULT_PORTRAIT_BASE)]
    portrait_base: String,

    /// Meta report endpoint for popular items
    #[arg(long)]
    meta_url: Option<String>,

    /// Species identifier to focus at startup, e.g. PIKACHU
    #[arg(long)]
    species: Option<String>,

    /// Force the shiny portrait on or off
    #[arg(long)]
    shiny: Option<bool>,

    /// Portrait emotion override, e.g. Happy
    #[arg(long)]
    emotion: Option<Emotion>,

    /// Preferences file
    #[arg(long)]
    preferences: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum ShopComponentId {
    Browser,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum ShopContext {
    Browser,
}

impl EventRoutingState<ShopComponentId, ShopContext> for AppState {
    fn focused(&self) -> Option<ShopComponentId> {
        Some(ShopComponentId::Browser)
    }

    fn modal(&self) -> Option<ShopComponentId> {
        None
    }

    fn binding_context(&self, id: ShopComponentId) -> ShopContext {
        match id {
            ShopComponentId::Browser => ShopContext::Browser,
        }
    }

    fn default_context(&self) -> ShopContext {
        ShopContext::Browser
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        catalog,
        locale,
        portrait_base,
        meta_url,
        species,
        shiny,
        emotion,
        preferences,
        debug: debug_args,
    } = Args::parse();

    let _log_guard = config::setup_logging(&config::log_directory())?;
    let debug = DebugSession::new(debug_args);

    let session = SessionConfig {
        catalog_path: catalog,
        locale_path: locale,
        portrait_base,
        meta_url,
        preferences_path: preferences.unwrap_or_else(Preferences::default_path),
    };
    tracing::info!(?session, "starting shopdex");

    let state = debug
        .load_state_or_else_async(move || async move {
            let mut state = AppState::builtin(session);
            if let Some(name) = species {
                state.focus_species(Pkm::from(name.as_str()));
            }
            state.shiny_override = shiny;
            state.emotion_override = emotion;
            Ok::<AppState, io::Error>(state)
        })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = SpriteBackend::new(stdout, sprite_backend::sprite_registry());
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &debug, store, replay_actions).await;

    // ===== Cleanup =====
    sprite_backend::clear_sprites();
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    Ok(())
}

struct ShopUi {
    browser: ShopBrowser,
}

impl ShopUi {
    fn new() -> Self {
        Self {
            browser: ShopBrowser::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<ShopComponentId>,
    ) {
        event_ctx.set_component_area(ShopComponentId::Browser, area);
        let props = ShopBrowserProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.browser.render(frame, area, props);
    }

    fn handle_browser_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = ShopBrowserProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .browser
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(ShopUi::new()));
    let mut bus: EventBus<AppState, Action, ShopComponentId, ShopContext> = EventBus::new();
    let keybindings: Keybindings<ShopContext> = Keybindings::new();

    let ui_browser = Rc::clone(&ui);
    bus.register(ShopComponentId::Browser, move |event, state| {
        ui_browser
            .borrow_mut()
            .handle_browser_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            Some(Action::Init),
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            handle_effect,
        )
        .await
}

fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>) {
    match effect {
        Effect::LoadPreferences { path } => {
            ctx.tasks().spawn(TaskKey::new("preferences"), async move {
                match Preferences::load(&path).await {
                    Ok(preferences) => Action::PreferencesDidLoad(preferences),
                    Err(error) => {
                        tracing::warn!(%error, "preferences load failed");
                        Action::PreferencesDidError(error.to_string())
                    }
                }
            });
        }
        Effect::SavePreferences { path, preferences } => {
            ctx.tasks().spawn(TaskKey::new("preferences_save"), async move {
                match preferences.save(&path).await {
                    Ok(()) => Action::PreferencesDidSave,
                    Err(error) => {
                        tracing::warn!(%error, "preferences save failed");
                        Action::PreferencesDidError(error.to_string())
                    }
                }
            });
        }
        Effect::LoadCatalog { path } => {
            ctx.tasks().spawn(TaskKey::new("catalog"), async move {
                match Catalog::load(&path).await {
                    Ok(catalog) => {
                        tracing::info!(species = catalog.species.len(), "catalog loaded");
                        Action::CatalogDidLoad(catalog)
                    }
                    Err(error) => {
                        tracing::error!(%error, "catalog load failed");
                        Action::CatalogDidError(error.to_string())
                    }
                }
            });
        }
        Effect::LoadLocale { path } => {
            ctx.tasks().spawn(TaskKey::new("locale"), async move {
                match Translations::load(&path).await {
                    Ok(translations) => Action::LocaleDidLoad(translations),
                    Err(error) => {
                        tracing::error!(%error, "locale load failed");
                        Action::LocaleDidError(error.to_string())
                    }
                }
            });
        }
        Effect::LoadPortrait { src } => {
            ctx.tasks().spawn(TaskKey::new("portrait"), async move {
                let decoded = match api::load_portrait(&src).await {
                    Ok(bytes) => sprite::decode_sprite(&bytes),
                    Err(error) => Err(error),
                };
                match decoded {
                    Ok(sprite) => Action::PortraitDidLoad { src, sprite },
                    Err(error) => {
                        tracing::debug!(%src, %error, "portrait unavailable");
                        Action::PortraitDidError {
                            src,
                            error: error.to_string(),
                        }
                    }
                }
            });
        }
        Effect::FetchPopularItems { url } => {
            ctx.tasks().spawn(TaskKey::new("popular_items"), async move {
                match api::fetch_popular_items(&url).await {
                    Ok(items) => Action::PopularItemsDidLoad(items),
                    Err(error) => {
                        tracing::warn!(%url, %error, "meta report fetch failed");
                        Action::PopularItemsDidError(error.to_string())
                    }
                }
            });
        }
    }
}
