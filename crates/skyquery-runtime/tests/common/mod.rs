//! Shared fixtures for runtime tests

#![allow(dead_code)]

use skyquery_core::ParameterMap;

pub const BASE_URL: &str = "https://api.bsky.app/";

/// One feed item: a reply by person1, reposted by person3
pub const SINGLE_POST: &str = r#"{
    "feed": [
        {
            "post": {
                "uri": "at://did:plc:mbpk2abdxtk2j2lctwfpclvv/app.bsky.feed.post/3lclxspblnk2p",
                "cid": "bafyreidkaflhw4tqnqgceusgdcv6oxrprbynfbkrvjmxkwwe52rsuvn52i",
                "author": {
                    "did": "did:plc:mbpk2abdxtk2j2lctwfpclvv",
                    "handle": "person1.com",
                    "displayName": "Person 1",
                    "viewer": {
                        "muted": false,
                        "blockedBy": false,
                        "following": "at://did:plc:25t5atrycib2wbdj5cpcax4k/app.bsky.graph.follow/3lardkkptqn2y"
                    },
                    "labels": [],
                    "createdAt": "2023-04-23T12:04:24.705Z"
                },
                "record": {
                    "$type": "app.bsky.feed.post",
                    "createdAt": "2024-12-06T00:53:27.014Z",
                    "langs": ["en"],
                    "reply": {
                        "parent": {
                            "cid": "bafyreidkjlzicu6k35do6nke4fzbs7dvvl4ov5evzzbalyksrbql7gkrim",
                            "uri": "at://did:plc:h4qem3f3cz6yvs3r3xvs634g/app.bsky.feed.post/3lclwanfnc22k"
                        },
                        "root": {
                            "cid": "bafyreidkjlzicu6k35do6nke4fzbs7dvvl4ov5evzzbalyksrbql7gkrim",
                            "uri": "at://did:plc:h4qem3f3cz6yvs3r3xvs634g/app.bsky.feed.post/3lclwanfnc22k"
                        }
                    },
                    "text": "Person 1's Post Text"
                },
                "replyCount": 0,
                "repostCount": 0,
                "likeCount": 0,
                "quoteCount": 0,
                "indexedAt": "2024-12-06T00:53:27.312Z",
                "viewer": {
                    "threadMuted": false,
                    "embeddingDisabled": false
                },
                "labels": []
            },
            "reply": {
                "root": {
                    "$type": "app.bsky.feed.defs#postView",
                    "uri": "at://did:plc:h4qem3f3cz6yvs3r3xvs634g/app.bsky.feed.post/3lclwanfnc22k",
                    "cid": "bafyreidkjlzicu6k35do6nke4fzbs7dvvl4ov5evzzbalyksrbql7gkrim",
                    "author": {
                        "did": "did:plc:h4qem3f3cz6yvs3r3xvs634g",
                        "handle": "person2.in",
                        "displayName": "Person 2",
                        "associated": { "chat": { "allowIncoming": "all" } },
                        "labels": [],
                        "createdAt": "2023-04-25T01:50:45.503Z"
                    },
                    "record": {
                        "$type": "app.bsky.feed.post",
                        "createdAt": "2024-12-06T00:25:27.328Z",
                        "langs": ["en"],
                        "text": "Person 2's original post."
                    },
                    "replyCount": 4,
                    "repostCount": 1,
                    "likeCount": 13,
                    "quoteCount": 0,
                    "indexedAt": "2024-12-06T00:25:27.510Z",
                    "labels": []
                },
                "parent": {
                    "$type": "app.bsky.feed.defs#postView",
                    "uri": "at://did:plc:h4qem3f3cz6yvs3r3xvs634g/app.bsky.feed.post/3lclwanfnc22k",
                    "cid": "bafyreidkjlzicu6k35do6nke4fzbs7dvvl4ov5evzzbalyksrbql7gkrim",
                    "record": {
                        "$type": "app.bsky.feed.post",
                        "createdAt": "2024-12-06T00:25:27.328Z",
                        "text": "Person 2's original post."
                    },
                    "replyCount": 4,
                    "repostCount": 1,
                    "likeCount": 13,
                    "quoteCount": 0,
                    "indexedAt": "2024-12-06T00:25:27.510Z"
                }
            },
            "reason": {
                "$type": "app.bsky.feed.defs#reasonRepost",
                "by": {
                    "did": "did:plc:ecz4yeln5u44knbej3aphym2",
                    "handle": "person3.com",
                    "displayName": "Person 3",
                    "labels": [
                        {
                            "src": "did:plc:ecz4yeln5u44knbej3aphym2",
                            "uri": "at://did:plc:ecz4yeln5u44knbej3aphym2/app.bsky.actor.profile/self",
                            "cid": "bafyreia4a37n6banx2u4jrtw5t62h43vqpdakpf6xanrkkub6xnvquyrge",
                            "val": "!no-unauthenticated",
                            "cts": "1970-01-01T00:00:00.000Z"
                        }
                    ],
                    "createdAt": "2023-11-08T18:47:48.957Z"
                },
                "indexedAt": "2024-12-06T00:27:53.913Z"
            }
        }
    ],
    "cursor": "1733446407312::bafyreidkaflhw4tqnqgceusgdcv6oxrprbynfbkrvjmxkwwe52rsuvn52i"
}"#;

/// Feed body with `count` items whose texts are "Post 0", "Post 1", ...
pub fn feed_body(count: usize) -> String {
    let items: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "post": {
                    "uri": format!("at://did:plc:author{}/app.bsky.feed.post/{}", i % 7, i),
                    "cid": format!("cid-{}", i),
                    "author": { "did": format!("did:plc:author{}", i % 7), "handle": format!("author{}.bsky.social", i % 7) },
                    "record": {
                        "$type": "app.bsky.feed.post",
                        "text": format!("Post {}", i),
                        "createdAt": "2024-12-06T00:00:00.000Z"
                    },
                    "likeCount": i,
                    "indexedAt": "2024-12-06T00:00:01.000Z"
                }
            })
        })
        .collect();

    serde_json::json!({ "feed": items, "cursor": "next" }).to_string()
}

pub fn params(pairs: &[(&str, &str)]) -> ParameterMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
