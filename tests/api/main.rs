mod cocktail;
mod cors;
mod health_check;
mod shop;
