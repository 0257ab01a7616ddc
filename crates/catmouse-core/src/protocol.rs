//! Eating protocol

use catmouse_util::{BowlId, Species};
use std::time::Duration;

use crate::{Arbiter, InvariantViolation};

/// Occupy `bowl`, eat for `duration`, then vacate it.
///
/// The arbitration lock is released while eating, so eaters at other bowls
/// are never serialized behind this one.
pub async fn eat(
    arbiter: &Arbiter,
    species: Species,
    bowl: BowlId,
    duration: Duration,
) -> Result<(), InvariantViolation> {
    arbiter.occupy(bowl, species)?;
    tokio::time::sleep(duration).await;
    arbiter.vacate(bowl, species)
}

pub async fn cat_eat(
    arbiter: &Arbiter,
    bowl: BowlId,
    duration: Duration,
) -> Result<(), InvariantViolation> {
    eat(arbiter, Species::Cat, bowl, duration).await
}

pub async fn mouse_eat(
    arbiter: &Arbiter,
    bowl: BowlId,
    duration: Duration,
) -> Result<(), InvariantViolation> {
    eat(arbiter, Species::Mouse, bowl, duration).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BowlState;
    use std::sync::Arc;

    #[tokio::test]
    async fn round_trip_leaves_bowl_empty() {
        let arbiter = Arbiter::new(2);
        let bowl = BowlId::new(1).unwrap();

        cat_eat(&arbiter, bowl, Duration::ZERO).await.unwrap();
        mouse_eat(&arbiter, bowl, Duration::ZERO).await.unwrap();

        let store = arbiter.snapshot().unwrap();
        assert_eq!(store.state(bowl), Some(BowlState::Empty));
        assert!(store.is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn bowl_is_held_while_eating() {
        let arbiter = Arc::new(Arbiter::new(1));
        let bowl = BowlId::new(1).unwrap();

        let eater = {
            let arbiter = arbiter.clone();
            tokio::spawn(async move { cat_eat(&arbiter, bowl, Duration::from_secs(5)).await })
        };
        tokio::task::yield_now().await;

        let store = arbiter.snapshot().unwrap();
        assert_eq!(store.state(bowl), Some(BowlState::Occupied(Species::Cat)));

        eater.await.unwrap().unwrap();
        assert!(arbiter.snapshot().unwrap().is_idle());
    }

    #[tokio::test(start_paused = true)]
    async fn mouse_during_cat_meal_is_fatal() {
        let arbiter = Arc::new(Arbiter::new(2));

        let eater = {
            let arbiter = arbiter.clone();
            tokio::spawn(async move {
                cat_eat(&arbiter, BowlId::new(1).unwrap(), Duration::from_secs(1)).await
            })
        };
        tokio::task::yield_now().await;

        let err = mouse_eat(&arbiter, BowlId::new(2).unwrap(), Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, InvariantViolation::SpeciesMixing { eating: 1, .. }));

        eater.await.unwrap().unwrap();
    }
}
