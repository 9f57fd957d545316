use proptest::prelude::*;
use ring_queue::{CircularQueue, Cursor, QueueError};
use std::collections::VecDeque;

#[derive(Debug, Clone)]
enum Op {
    Enqueue(u32),
    Dequeue,
    Grow(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<u32>().prop_map(Op::Enqueue),
        3 => Just(Op::Dequeue),
        1 => (0usize..12).prop_map(Op::Grow),
    ]
}

proptest! {
    /// Replays random operations against a `VecDeque` model.
    #[test]
    fn matches_vecdeque_model(capacity in 0usize..8, ops in prop::collection::vec(op(), 0..200)) {
        let mut queue = CircularQueue::new(capacity).unwrap();
        let mut model = VecDeque::new();
        let mut capacity = capacity;
        let (mut enqueued, mut dequeued) = (0usize, 0usize);

        for op in ops {
            match op {
                Op::Enqueue(value) => match queue.enqueue(value) {
                    Ok(()) => {
                        prop_assert!(model.len() < capacity);
                        model.push_back(value);
                        enqueued += 1;
                    }
                    Err(rejected) => {
                        prop_assert_eq!(model.len(), capacity);
                        prop_assert_eq!(rejected.error(), QueueError::Full);
                        prop_assert_eq!(rejected.into_inner(), value);
                    }
                },
                Op::Dequeue => match model.pop_front() {
                    Some(expected) => {
                        prop_assert_eq!(queue.dequeue(), Ok(expected));
                        dequeued += 1;
                    }
                    None => prop_assert_eq!(queue.dequeue(), Err(QueueError::Empty)),
                },
                Op::Grow(new_capacity) => {
                    if new_capacity < model.len() {
                        prop_assert_eq!(
                            queue.grow(new_capacity),
                            Err(QueueError::WouldTruncate { len: model.len(), requested: new_capacity })
                        );
                    } else {
                        prop_assert_eq!(queue.grow(new_capacity), Ok(()));
                        capacity = new_capacity;
                    }
                }
            }

            prop_assert_eq!(queue.len(), enqueued - dequeued);
            prop_assert!(queue.len() <= queue.capacity());
            prop_assert_eq!(queue.capacity(), capacity);
            prop_assert_eq!(queue.peek_front().ok(), model.front());
            prop_assert_eq!(queue.peek_rear().ok(), model.back());
            prop_assert!(queue.iter().eq(model.iter()));

            match queue.cursor() {
                Cursor::Empty => prop_assert!(model.is_empty()),
                Cursor::Occupied { head, tail } => {
                    prop_assert!(head < capacity && tail < capacity);
                    prop_assert_eq!(tail, (head + queue.len() - 1) % capacity);
                }
            }
        }
    }

    /// Growing keeps order whatever the head offset is.
    #[test]
    fn grow_preserves_order_at_any_offset(
        capacity in 1usize..16,
        offset in 0usize..16,
        fill in 0usize..16,
        extra in 0usize..8,
    ) {
        let offset = offset % capacity;
        let fill = fill % (capacity + 1);
        let mut queue = CircularQueue::new(capacity).unwrap();

        // Rotate the head to `offset`.
        for i in 0..offset {
            queue.enqueue(i).unwrap();
        }
        for _ in 0..offset {
            queue.dequeue().unwrap();
        }
        for i in 0..fill {
            queue.enqueue(100 + i).unwrap();
        }

        queue.grow(capacity + extra).unwrap();
        prop_assert_eq!(queue.len(), fill);
        if fill > 0 {
            prop_assert_eq!(queue.cursor(), Cursor::Occupied { head: 0, tail: fill - 1 });
        } else {
            prop_assert_eq!(queue.cursor(), Cursor::Empty);
        }
        let drained: Vec<_> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
        prop_assert_eq!(drained, (0..fill).map(|i| 100 + i).collect::<Vec<_>>());
    }

    /// Fill to capacity, drain, and the next dequeue reports empty.
    #[test]
    fn round_trip_then_empty(items in prop::collection::vec(any::<i64>(), 0..64)) {
        let mut queue = CircularQueue::new(items.len()).unwrap();
        for &item in &items {
            queue.enqueue(item).unwrap();
        }
        prop_assert!(queue.is_full());
        for &item in &items {
            prop_assert_eq!(queue.dequeue(), Ok(item));
        }
        prop_assert_eq!(queue.dequeue(), Err(QueueError::Empty));
        prop_assert_eq!(queue.cursor(), Cursor::Empty);
    }
}

#[test]
fn grow_after_enqueue_three_dequeue_one_enqueue_two() {
    let mut queue = CircularQueue::new(4).unwrap();
    for c in ['a', 'b', 'c'] {
        queue.enqueue(c).unwrap();
    }
    assert_eq!(queue.dequeue(), Ok('a'));
    queue.enqueue('d').unwrap();
    queue.enqueue('e').unwrap();
    assert!(matches!(queue.cursor(), Cursor::Occupied { head: 1, .. }));

    queue.grow(10).unwrap();
    assert_eq!(
        queue.iter().copied().collect::<String>(),
        "bcde"
    );
}
