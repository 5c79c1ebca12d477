//! Popular-events carousel demo
//!
//! Loads events from the events API, then walks through the carousel
//! behaviours: autoplay, hover pause, debounced navigation, wraparound and a
//! slide click. Configure with the `CAROUSEL_*` and `EVENTS_*` environment
//! variables (or a `.env` file).

use anyhow::Context;
use marquee_carousel::{
    CarouselController, CarouselEnvironment, CarouselView, ChannelRouter, Config, Direction,
    EventSummary, HttpEventSource, SlideCard,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee_carousel=debug,marquee_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Marquee: popular events carousel ===\n");

    let config = Config::from_env().context("invalid configuration")?;
    let source = HttpEventSource::new(&config.source).context("building events client")?;
    println!("Events source: {}", source.events_url());

    let (router, mut routes) = ChannelRouter::new();
    let env = CarouselEnvironment::new(config.carousel.clone(), Arc::new(router))
        .with_source(Arc::new(source));
    let carousel: CarouselController<EventSummary> = CarouselController::new(env);

    tokio::spawn(async move {
        while let Some(route) = routes.recv().await {
            println!("  -> navigate to {route}");
        }
    });

    carousel.initialize(Vec::new()).await?;
    let mut loading = carousel.refresh().await?;
    loading.wait_with_timeout(config.source.request_timeout * 2).await?;

    print_view(&carousel, &config).await;
    if carousel.with_state(|s| s.slides().is_empty()).await {
        carousel.shutdown(Duration::from_secs(1)).await?;
        return Ok(());
    }

    println!("\n>>> Waiting for one autoplay tick");
    tokio::time::sleep(config.carousel.autoplay_interval + Duration::from_millis(50)).await;
    print_position(&carousel).await;

    println!("\n>>> Hover (pause), then wait a full interval");
    carousel.pause().await?;
    tokio::time::sleep(config.carousel.autoplay_interval).await;
    print_position(&carousel).await;
    carousel.resume().await?;

    println!("\n>>> Double click on previous (second click is debounced)");
    carousel.advance(Direction::Prev).await?;
    carousel.advance(Direction::Prev).await?;
    print_position(&carousel).await;

    println!("\n>>> Previous until the strip wraps");
    for _ in 0..carousel.with_state(|s| s.slides().len()).await {
        tokio::time::sleep(config.carousel.navigation_cooldown).await;
        carousel.advance(Direction::Prev).await?;
        print_position(&carousel).await;
    }
    tokio::time::sleep(config.carousel.transition + config.carousel.settle * 2).await;
    print_position(&carousel).await;

    println!("\n>>> Click the leading clone");
    carousel.activate(0).await?;
    tokio::time::sleep(Duration::from_millis(50)).await;

    carousel.shutdown(Duration::from_secs(1)).await?;
    println!("\n=== Done ===");
    Ok(())
}

async fn print_view(carousel: &CarouselController<EventSummary>, config: &Config) {
    let view = carousel
        .view(|event| SlideCard::from_event(event, &config.source))
        .await;

    match &view {
        CarouselView::Empty { message } => println!("{message}"),
        CarouselView::Strip { slides, .. } => {
            for slide in slides {
                let card = &slide.content;
                println!(
                    "[{}] {} | {} | {} | {} | {}",
                    slide.key, card.title, card.tags, card.starts, card.venue, card.price_range
                );
            }
        },
    }
}

async fn print_position(carousel: &CarouselController<EventSummary>) {
    let (index, active, phase, animate) = carousel
        .with_state(|s| (s.current_index(), s.active_real_index(), s.phase(), s.is_transitioning()))
        .await;
    println!("  position {index}, showing {active:?}, phase {phase:?}, animate {animate}");
}
