pub mod ability_tooltip;
pub mod description_text;
pub mod detail_view;
pub mod keyed;
pub mod pokemon_detail;
pub mod popular_items;
pub mod shop_browser;
pub mod style;
pub mod synergy_icon;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use ability_tooltip::{AbilityTooltip, AbilityTooltipProps};
pub use detail_view::{DetailContext, DetailView, StarStrip};
pub use keyed::Keyed;
pub use pokemon_detail::{PokemonDetail, PokemonDetailProps};
pub use popular_items::{PopularItems, PopularItemsProps, MAX_POPULAR_ITEMS};
pub use shop_browser::{ShopBrowser, ShopBrowserProps};
pub use style::{DetailSection, DetailStyle};
pub use synergy_icon::{SynergyIcon, SynergyIconProps};
