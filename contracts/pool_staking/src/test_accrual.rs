extern crate std;

use crate::{
    rewards::SCALE,
    test::{at_block, setup, staker, TOKEN_POOL},
    PoolAsset,
};

// ── Reward accrual ────────────────────────────────────────────────────────────

#[test]
fn test_reward_accrual_over_blocks() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);

    at_block(&ctx.env, 10);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // No block has passed yet.
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 0);

    // 20 blocks × 10 per block, half the total weight: 100.
    at_block(&ctx.env, 30);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 100);

    ctx.client.update_pool(&TOKEN_POOL);
    let pool = ctx.client.pool(&TOKEN_POOL);
    assert_eq!(pool.last_reward_block, 30);
    assert_eq!(pool.acc_reward_per_share, 100 * SCALE / 1_000);
}

#[test]
fn test_update_pool_is_idempotent_within_a_block() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    at_block(&ctx.env, 40);
    ctx.client.update_pool(&TOKEN_POOL);
    let first = ctx.client.pool(&TOKEN_POOL);
    ctx.client.update_pool(&TOKEN_POOL);
    ctx.client.mass_update_pools();
    assert_eq!(ctx.client.pool(&TOKEN_POOL), first);
}

#[test]
fn test_empty_pool_blocks_are_not_recovered() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);

    // Pool sat empty from block 0 to 50.
    at_block(&ctx.env, 50);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);
    assert_eq!(ctx.client.pool(&TOKEN_POOL).acc_reward_per_share, 0);
    assert_eq!(ctx.client.pool(&TOKEN_POOL).last_reward_block, 50);

    at_block(&ctx.env, 60);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 50);
}

#[test]
fn test_proportional_rewards_two_stakers() {
    let ctx = setup();
    let alice = staker(&ctx, 3_000);
    let bob = staker(&ctx, 1_000);

    at_block(&ctx.env, 10);
    ctx.client.deposit(&alice, &TOKEN_POOL, &3_000); // 75 % of the pool
    ctx.client.deposit(&bob, &TOKEN_POOL, &1_000); // 25 % of the pool

    // 40 blocks × 10 × ½ weight = 200 for the pool.
    at_block(&ctx.env, 50);
    let alice_earned = ctx.client.pending_reward(&TOKEN_POOL, &alice);
    let bob_earned = ctx.client.pending_reward(&TOKEN_POOL, &bob);

    assert_eq!(alice_earned, 150, "Alice should earn 75% of pool rewards");
    assert_eq!(bob_earned, 50, "Bob should earn 25% of pool rewards");
    assert_eq!(alice_earned + bob_earned, 200);
}

#[test]
fn test_accrual_stops_at_end_block() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);

    at_block(&ctx.env, 90);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Only blocks 90..100 pay out.
    at_block(&ctx.env, 150);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 50);

    ctx.client.update_pool(&TOKEN_POOL);
    assert_eq!(ctx.client.pool(&TOKEN_POOL).last_reward_block, 100);

    at_block(&ctx.env, 200);
    ctx.client.update_pool(&TOKEN_POOL);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 50);
}

#[test]
fn test_start_block_delays_accrual() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Raising the start block after the fact only affects future accrual.
    ctx.client.set_start_block(&ctx.admin, &20);

    at_block(&ctx.env, 30);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 50);
}

#[test]
fn test_lowering_end_block_keeps_earned_reward() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Blocks 0..50 under the original window: 250.
    at_block(&ctx.env, 50);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);

    ctx.client.set_end_block(&ctx.admin, &30);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);
    assert_eq!(ctx.client.pool(&TOKEN_POOL).last_reward_block, 50);

    // The window is closed from here on.
    at_block(&ctx.env, 80);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);
    assert_eq!(ctx.client.claim(&participant, &TOKEN_POOL), 250);
}

#[test]
fn test_raising_start_block_mid_window_keeps_earned_reward() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Blocks 0..40 already earned 200.
    at_block(&ctx.env, 40);
    ctx.client.set_start_block(&ctx.admin, &60);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 200);

    // 40..60 is now outside the window; 60..70 adds 50.
    at_block(&ctx.env, 70);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);
}

#[test]
fn test_reward_per_block_change_is_not_retroactive() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Blocks 0..50 at 10 per block: 250 for this pool.
    at_block(&ctx.env, 50);
    ctx.client.set_reward_per_block(&ctx.admin, &20);
    assert_eq!(ctx.client.reward_per_block(), 20);

    // Blocks 50..80 at 20 per block: 300 more.
    at_block(&ctx.env, 80);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 550);
}

#[test]
fn test_add_pool_with_update_protects_earned_rewards() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Blocks 0..40 under the old split: 40 × 10 × 100/200 = 200.
    at_block(&ctx.env, 40);
    ctx.client.add_pool(
        &ctx.admin,
        &PoolAsset::Token(ctx.stake_token.clone()),
        &200,
        &1,
        &10,
        &true,
    );
    assert_eq!(ctx.client.pool(&TOKEN_POOL).last_reward_block, 40);

    // Blocks 40..60 under the new split: 20 × 10 × 100/400 = 50.
    at_block(&ctx.env, 60);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);
}

#[test]
fn test_add_pool_without_update_dilutes_retroactively() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    at_block(&ctx.env, 40);
    ctx.client.add_pool(
        &ctx.admin,
        &PoolAsset::Token(ctx.stake_token.clone()),
        &200,
        &1,
        &10,
        &false,
    );

    // All 60 blocks are split under the new weights: 60 × 10 × 100/400.
    at_block(&ctx.env, 60);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 150);
}

#[test]
fn test_set_pool_weight_updates_total() {
    let ctx = setup();
    let participant = staker(&ctx, 1_000);
    ctx.client.deposit(&participant, &TOKEN_POOL, &1_000);

    // Blocks 0..20 at half the weight: 100.
    at_block(&ctx.env, 20);
    ctx.client.set_pool_weight(&ctx.admin, &TOKEN_POOL, &300, &true);
    assert_eq!(ctx.client.total_pool_weight(), 400);
    assert_eq!(ctx.client.pool(&TOKEN_POOL).pool_weight, 300);

    // Blocks 20..40 at three quarters: 150.
    at_block(&ctx.env, 40);
    assert_eq!(ctx.client.pending_reward(&TOKEN_POOL, &participant), 250);
}

#[test]
fn test_acc_reward_per_share_never_decreases() {
    let ctx = setup();
    let alice = staker(&ctx, 5_000);
    let bob = staker(&ctx, 5_000);

    let mut last_acc = 0i128;
    for (block, step) in [(5u32, 0u8), (9, 1), (17, 2), (33, 3), (41, 0), (64, 1), (99, 2), (130, 3)] {
        at_block(&ctx.env, block);
        match step {
            0 => ctx.client.deposit(&alice, &TOKEN_POOL, &1_000),
            1 => ctx.client.deposit(&bob, &TOKEN_POOL, &700),
            2 => {
                ctx.client.request_withdraw(&alice, &TOKEN_POOL, &300);
            }
            _ => {
                ctx.client.claim(&bob, &TOKEN_POOL);
            }
        }
        let acc = ctx.client.pool(&TOKEN_POOL).acc_reward_per_share;
        assert!(acc >= last_acc, "accumulator went backwards at block {block}");
        last_acc = acc;
    }
}

#[test]
fn test_multiplier_view() {
    let ctx = setup();
    ctx.client.set_start_block(&ctx.admin, &10);

    assert_eq!(ctx.client.multiplier(&0, &30), 20);
    assert_eq!(ctx.client.multiplier(&90, &200), 10);
    assert_eq!(ctx.client.multiplier(&150, &200), 0);
    assert!(ctx.client.try_multiplier(&30, &20).is_err());
}
