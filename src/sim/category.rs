//! Collision categories and the contact filter table
//!
//! Every actor kind maps to exactly one category bit plus two masks:
//! which categories it wants contact reports for, and which it is
//! physically blocked by. The table below is the only place pairs are
//! whitelisted.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Exclusive category bits, OR-able into masks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionCategory: u32 {
        const PLAYER = 1 << 0;
        const ENEMY = 1 << 1;
        const PLAYER_BULLET = 1 << 2;
        const ENEMY_BULLET = 1 << 3;
        const GROUND = 1 << 4;
        const SCENE_EDGE = 1 << 5;
    }
}

/// What an actor is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActorKind {
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    Ground,
    SceneEdge,
}

/// Category plus masks for one actor kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactProfile {
    /// What the actor is
    pub category: CollisionCategory,
    /// Categories that must be reported as contacts when overlapping
    pub contact_test: CollisionCategory,
    /// Categories that physically block this actor
    pub collision: CollisionCategory,
}

impl ContactProfile {
    const fn new(
        category: CollisionCategory,
        contact_test: CollisionCategory,
        collision: CollisionCategory,
    ) -> Self {
        Self {
            category,
            contact_test,
            collision,
        }
    }
}

type Cat = CollisionCategory;

const PLAYER_PROFILE: ContactProfile = ContactProfile::new(
    Cat::PLAYER,
    Cat::ENEMY.union(Cat::ENEMY_BULLET).union(Cat::GROUND),
    Cat::SCENE_EDGE,
);
const ENEMY_PROFILE: ContactProfile = ContactProfile::new(
    Cat::ENEMY,
    Cat::PLAYER.union(Cat::PLAYER_BULLET),
    Cat::empty(),
);
const PLAYER_BULLET_PROFILE: ContactProfile =
    ContactProfile::new(Cat::PLAYER_BULLET, Cat::ENEMY, Cat::empty());
const ENEMY_BULLET_PROFILE: ContactProfile =
    ContactProfile::new(Cat::ENEMY_BULLET, Cat::PLAYER, Cat::empty());
const GROUND_PROFILE: ContactProfile =
    ContactProfile::new(Cat::GROUND, Cat::PLAYER, Cat::empty());
const SCENE_EDGE_PROFILE: ContactProfile =
    ContactProfile::new(Cat::SCENE_EDGE, Cat::empty(), Cat::PLAYER);

impl ActorKind {
    pub const ALL: [ActorKind; 6] = [
        ActorKind::Player,
        ActorKind::Enemy,
        ActorKind::PlayerBullet,
        ActorKind::EnemyBullet,
        ActorKind::Ground,
        ActorKind::SceneEdge,
    ];

    pub const fn profile(self) -> ContactProfile {
        match self {
            ActorKind::Player => PLAYER_PROFILE,
            ActorKind::Enemy => ENEMY_PROFILE,
            ActorKind::PlayerBullet => PLAYER_BULLET_PROFILE,
            ActorKind::EnemyBullet => ENEMY_BULLET_PROFILE,
            ActorKind::Ground => GROUND_PROFILE,
            ActorKind::SceneEdge => SCENE_EDGE_PROFILE,
        }
    }

    pub const fn category(self) -> CollisionCategory {
        self.profile().category
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActorKind::Player => "player",
            ActorKind::Enemy => "enemy",
            ActorKind::PlayerBullet => "playerBullet",
            ActorKind::EnemyBullet => "enemyBullet",
            ActorKind::Ground => "ground",
            ActorKind::SceneEdge => "sceneEdge",
        }
    }
}

/// Whether an overlap between `a` and `b` must be reported as a contact.
///
/// A pair qualifies when either side's contact-test mask contains the
/// other side's category.
pub fn reports_contact(a: ActorKind, b: ActorKind) -> bool {
    let (pa, pb) = (a.profile(), b.profile());
    pa.contact_test.intersects(pb.category) || pb.contact_test.intersects(pa.category)
}

/// Whether `mover` is physically stopped by `obstacle`
pub fn is_blocked_by(mover: ActorKind, obstacle: ActorKind) -> bool {
    mover.profile().collision.intersects(obstacle.category())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_single_bits() {
        let mut seen = CollisionCategory::empty();
        for kind in ActorKind::ALL {
            let cat = kind.category();
            assert_eq!(cat.bits().count_ones(), 1, "{:?}", kind);
            assert!(!seen.intersects(cat), "duplicate bit for {:?}", kind);
            seen |= cat;
        }
        assert_eq!(seen, CollisionCategory::all());
    }

    #[test]
    fn test_reported_pairs_match_table() {
        use ActorKind::*;
        let expected = [
            (Player, Enemy),
            (Player, EnemyBullet),
            (Player, Ground),
            (Enemy, PlayerBullet),
        ];
        for a in ActorKind::ALL {
            for b in ActorKind::ALL {
                let listed = expected
                    .iter()
                    .any(|&(x, y)| (x, y) == (a, b) || (x, y) == (b, a));
                assert_eq!(reports_contact(a, b), listed, "{:?} vs {:?}", a, b);
            }
        }
    }

    #[test]
    fn test_only_player_is_blocked_by_edge() {
        for kind in ActorKind::ALL {
            assert_eq!(
                is_blocked_by(kind, ActorKind::SceneEdge),
                kind == ActorKind::Player
            );
        }
        assert!(!is_blocked_by(ActorKind::Player, ActorKind::Ground));
        assert!(!is_blocked_by(ActorKind::Player, ActorKind::Enemy));
    }
}
