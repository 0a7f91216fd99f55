use campaign_strategist::config::ExtractionConfig;
use campaign_strategist::strategist::tools::RequirementExtractor;
use speculate2::speculate;

speculate! {
    before {
        let extractor = RequirementExtractor::new(&ExtractionConfig::default())
            .expect("Failed to build extractor");
    }

    describe "product and audience" {
        it "reads product and audience lines" {
            let reqs = extractor.extract("Product: Foo\nAudience: Bar");

            assert_eq!(reqs.product.as_deref(), Some("Foo"));
            assert_eq!(reqs.audience.as_deref(), Some("Bar"));
        }

        it "title cases multi word values" {
            let reqs = extractor.extract("PRODUCT: smart HOME hub\nTarget Audience: first-time buyers");

            assert_eq!(reqs.product.as_deref(), Some("Smart Home Hub"));
            assert_eq!(reqs.audience.as_deref(), Some("First-Time Buyers"));
        }

        it "ignores indentation and blank lines" {
            let reqs = extractor.extract("\n\n    ai solution:   copilot  \n\n");

            assert_eq!(reqs.product.as_deref(), Some("Copilot"));
        }

        it "leaves both empty when no prefix matches" {
            let reqs = extractor.extract("Just some marketing copy.");

            assert!(reqs.product.is_none());
            assert!(reqs.audience.is_none());
        }
    }

    describe "research keywords" {
        it "splits the keywords line on commas" {
            let reqs = extractor.extract("keywords: a, b, c");

            assert_eq!(reqs.research_keywords, vec!["a", "b", "c"]);
        }

        it "accepts a tags line" {
            let reqs = extractor.extract("Product: Foo\nTags: Speed ,Power");

            assert_eq!(reqs.research_keywords, vec!["speed", "power"]);
        }

        it "stops at the end of the keywords line" {
            let reqs = extractor.extract("keywords: a, b\nAudience: Bar");

            assert_eq!(reqs.research_keywords, vec!["a", "b"]);
        }

        it "falls back to the product" {
            let reqs = extractor.extract("Product: Foo\nAudience: Bar");

            assert_eq!(reqs.research_keywords, vec!["Foo"]);
        }

        it "falls back to the audience when there is no product" {
            let reqs = extractor.extract("Audience: Bar");

            assert_eq!(reqs.research_keywords, vec!["Bar"]);
        }

        it "is empty with neither keywords nor product" {
            let reqs = extractor.extract("A brief with nothing structured in it");

            assert!(reqs.research_keywords.is_empty());
        }

        it "skips an empty product line when falling back" {
            let reqs = extractor.extract("Product:\nAudience: Bar");

            assert!(reqs.product.is_none());
            assert_eq!(reqs.research_keywords, vec!["Bar"]);
        }

        it "is empty for a product line with no value" {
            let reqs = extractor.extract("Product:   ");

            assert!(reqs.product.is_none());
            assert!(reqs.research_keywords.is_empty());
        }

        it "is empty for an empty keywords line and no product" {
            let reqs = extractor.extract("keywords:   ");

            assert!(reqs.research_keywords.is_empty());
        }
    }
}
