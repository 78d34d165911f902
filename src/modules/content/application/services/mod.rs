mod portfolio_content;

pub use portfolio_content::PortfolioContent;
